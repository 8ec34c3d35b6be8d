//! HTTP route definitions

use crate::api::handlers;
use crate::api::models::{
    ChatTurnRequest, ChatTurnResponse, HealthResponse, SessionStartResponse,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chat Relay Gateway API",
        version = "0.1.0",
        description = "Minimal chat relay forwarding user messages to hosted LLM backends with dual-backend fallback.",
        license(name = "MIT"),
    ),
    paths(
        handlers::session_start,
        handlers::chat_turn,
        handlers::health_check,
    ),
    components(schemas(
        ChatTurnRequest,
        ChatTurnResponse,
        SessionStartResponse,
        HealthResponse,
    )),
    tags(
        (name = "Chat", description = "Chat session and message relay endpoints"),
        (name = "Health", description = "Health and monitoring endpoints"),
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: Arc<crate::AppState>) -> Router {
    let api_routes = Router::new()
        .route("/session/start", post(handlers::session_start))
        .route("/chat", post(handlers::chat_turn));

    Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health_check))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Chat API under /v1 prefix
        .nest("/v1", api_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
