//! Message processing: relay, normalization, and per-message fallback

use futures::StreamExt;
use tracing::{debug, warn};

use crate::backend::chunk::assemble_reply;
use crate::error::{AppError, Result};
use crate::session::{BackendMode, Session};

/// Reply for a session that holds no backend at all
pub const NO_MODEL_REPLY: &str = "No model available for processing";

/// Relay one message through the session's backend and return a
/// display-ready reply.
///
/// Never fails: every error collapses into an in-band string at this
/// boundary.
pub async fn process(session: &Session, message: &str) -> String {
    match process_inner(session, message).await {
        Ok(reply) => reply,
        Err(e) => format!("Error processing your message: {e}"),
    }
}

async fn process_inner(session: &Session, message: &str) -> Result<String> {
    match session.mode() {
        BackendMode::PrimaryAgent => Ok(relay_via_agent(session, message).await),
        BackendMode::SecondaryDirect => {
            let direct = session.direct_backend().await?;
            direct.generate(message).await
        }
        BackendMode::Unavailable => Ok(NO_MODEL_REPLY.to_string()),
    }
}

/// Primary path with request-time fallback: try the agent, then the direct
/// backend, and collapse the two-step outcome into the final display string.
async fn relay_via_agent(session: &Session, message: &str) -> String {
    let agent_error = match collect_agent_reply(session, message).await {
        Ok(reply) => return reply,
        Err(e) => e,
    };

    warn!(error = %agent_error, "agent request failed, falling back to direct backend");

    if !session.direct_capability() {
        return format!(
            "Agent request failed and no direct backend is available: {agent_error}"
        );
    }

    let direct_error = match fallback_via_direct(session, message).await {
        Ok(reply) => return reply,
        Err(e) => e,
    };

    format!("Both backends failed. Agent: {agent_error}, Direct: {direct_error}")
}

async fn fallback_via_direct(session: &Session, message: &str) -> Result<String> {
    let direct = session.direct_backend().await?;
    direct.generate(message).await
}

/// Consume the agent's chunk stream into one reply string.
///
/// Chunks whose extracted text is empty or all-whitespace are skipped; the
/// rest concatenate in arrival order.
async fn collect_agent_reply(session: &Session, message: &str) -> Result<String> {
    let agent = session.agent().ok_or_else(|| {
        AppError::BackendRequest("agent backend handle is missing".to_string())
    })?;

    let mut stream = agent.run(message).await?;
    let mut parts: Vec<String> = Vec::new();
    while let Some(chunk) = stream.next().await {
        let text = chunk?.text();
        if !text.trim().is_empty() {
            parts.push(text);
        }
    }

    debug!(chunks = parts.len(), "agent stream finished");
    Ok(assemble_reply(&parts))
}
