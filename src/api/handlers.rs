//! HTTP request handlers for the chat surface

use crate::api::models::{
    ChatTurnRequest, ChatTurnResponse, HealthResponse, SessionStartResponse,
};
use crate::error::AppError;
use crate::processor;
use crate::session::BackendMode;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::info;

const GREETING: &str = "Hello! I'm your assistant. How can I help you today?";

fn setup_warning(failure: &str, api_key_env: &str) -> String {
    format!(
        "Model initialization failed: {failure}\n\n\
         Please make sure you have:\n\
         1. Set {api_key_env} in your .env file\n\
         2. Enabled at least one model backend\n\n\
         I'll work in fallback mode for now."
    )
}

fn fallback_reply(message: &str) -> String {
    format!(
        "**Fallback Mode Response**\n\n\
         You said: *{message}*\n\n\
         I'm running in fallback mode since no model backend is properly \
         configured. Please check your .env file and API key setup."
    )
}

/// Start a chat session
#[utoipa::path(
    post,
    path = "/v1/session/start",
    responses(
        (status = 200, description = "Greeting, or setup instructions when no backend is live", body = SessionStartResponse)
    ),
    tag = "Chat"
)]
pub async fn session_start(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionStartResponse>, AppError> {
    let response = match &state.session {
        Some(session) => {
            info!(mode = %session.mode(), "chat session started");
            SessionStartResponse {
                notice: GREETING.to_string(),
                ready: true,
            }
        }
        None => {
            let failure = state.init_error.as_deref().unwrap_or("no backend configured");
            SessionStartResponse {
                notice: setup_warning(failure, &state.settings.backend.api_key_env),
                ready: false,
            }
        }
    };

    Ok(Json(response))
}

/// Relay one chat turn
#[utoipa::path(
    post,
    path = "/v1/chat",
    request_body = ChatTurnRequest,
    responses(
        (status = 200, description = "Display-ready reply; failures arrive in-band as text", body = ChatTurnResponse)
    ),
    tag = "Chat"
)]
pub async fn chat_turn(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatTurnRequest>,
) -> Result<Json<ChatTurnResponse>, AppError> {
    info!(message_len = request.message.len(), "received chat turn");

    let reply = match &state.session {
        Some(session) => processor::process(session, &request.message).await,
        None => fallback_reply(&request.message),
    };

    Ok(Json(ChatTurnResponse { reply }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service health and backend mode", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, AppError> {
    let mode = state
        .session
        .as_ref()
        .map(|session| session.mode())
        .unwrap_or(BackendMode::Unavailable);

    Ok(Json(HealthResponse {
        status: if state.session.is_some() {
            "healthy"
        } else {
            "degraded"
        }
        .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend_mode: mode.to_string(),
    }))
}
