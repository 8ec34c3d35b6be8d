//! Chat Relay Gateway
//!
//! A minimal chat relay that forwards one user message per turn to a hosted
//! language-model API and returns the textual reply. Sessions initialize
//! against a streaming agent backend first and fall back to a direct
//! generation backend, both at construction and per message; failures are
//! always reported in-band as display-ready text.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod processor;
pub mod session;

pub use error::{AppError, Result};

use std::sync::Arc;

use session::Session;

/// Application state shared across all handlers
pub struct AppState {
    pub settings: config::Settings,
    /// The live session, or `None` when construction failed at startup
    pub session: Option<Arc<Session>>,
    /// Construction failure text surfaced in the session-start notice
    pub init_error: Option<String>,
}
