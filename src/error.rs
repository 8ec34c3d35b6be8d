//! Application error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum AppError {
    /// The credential was absent or empty at construction time
    #[error("missing credential")]
    MissingCredential,

    /// The credential still carries the sample placeholder value
    #[error("placeholder credential")]
    PlaceholderCredential,

    /// Neither the agent nor the direct backend could be constructed
    #[error("no usable model backend (agent: {agent}, direct: {direct})")]
    BackendUnavailable { agent: String, direct: String },

    /// A per-message backend call failed
    #[error("backend request failed: {0}")]
    BackendRequest(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for construction-time configuration failures
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::MissingCredential | AppError::PlaceholderCredential
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BackendUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::BackendRequest(_) | AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingCredential
            | AppError::PlaceholderCredential
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
