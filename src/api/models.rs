//! API request and response models for the chat surface

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One inbound chat turn from the widget
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChatTurnRequest {
    /// The user's message for this turn
    pub message: String,
}

/// One outbound chat turn toward the widget
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChatTurnResponse {
    /// Display-ready reply text (plain text or lightweight markup)
    pub reply: String,
}

/// Session start notice: greeting when a backend is live, setup warning otherwise
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SessionStartResponse {
    pub notice: String,
    pub ready: bool,
}

/// Health check response
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend_mode: String,
}
