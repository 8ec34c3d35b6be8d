//! Main entry point for the Chat Relay Gateway

use chat_relay_gateway::{
    api,
    backend::HttpBackendProvider,
    config::Settings,
    session::Session,
    AppState,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));

    if settings.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    info!("Starting Chat Relay Gateway");

    // Initialize the model session; a failure here degrades to fallback mode
    // instead of aborting, and is surfaced once at session start.
    let provider = Arc::new(HttpBackendProvider::new(settings.backend.clone()));
    let raw_credential = std::env::var(&settings.backend.api_key_env).ok();

    let (session, init_error) = match Session::initialize(raw_credential, provider) {
        Ok(session) => {
            info!(mode = %session.mode(), "model session initialized");
            (Some(Arc::new(session)), None)
        }
        Err(e) => {
            if e.is_configuration() {
                warn!(error = %e, "credential is not configured, serving in fallback mode");
            } else {
                warn!(error = %e, "model session initialization failed, serving in fallback mode");
            }
            (None, Some(e.to_string()))
        }
    };

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let state = Arc::new(AppState {
        settings,
        session,
        init_error,
    });

    // Build the router
    let app = api::routes::create_router(state);

    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
