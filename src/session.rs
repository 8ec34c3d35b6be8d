//! Session construction and backend mode selection

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::backend::{AgentBackend, BackendProvider, DirectBackend};
use crate::config::Credential;
use crate::error::{AppError, Result};

/// Which backend a session talks to, chosen once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    PrimaryAgent,
    SecondaryDirect,
    Unavailable,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::PrimaryAgent => "agent",
            BackendMode::SecondaryDirect => "direct",
            BackendMode::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-conversation state: one immutable backend mode, at most one live agent
/// handle, and a secondary handle created at most once on demand.
pub struct Session {
    mode: BackendMode,
    agent: Option<Arc<dyn AgentBackend>>,
    direct: OnceCell<Arc<dyn DirectBackend>>,
    provider: Arc<dyn BackendProvider>,
    credential: Credential,
}

impl Session {
    /// Construct a session from a raw credential value and a backend provider.
    ///
    /// The agent capability is attempted first; construction failure there
    /// falls through to the direct capability. A missing or placeholder
    /// credential is fatal before any backend attempt, so a half-built
    /// session is never observable.
    pub fn initialize(
        raw_credential: Option<String>,
        provider: Arc<dyn BackendProvider>,
    ) -> Result<Self> {
        let credential = Credential::resolve(raw_credential)?;

        let mut agent_failure = None;
        if provider.agent_available() {
            match provider.build_agent(&credential) {
                Ok(agent) => {
                    info!(mode = %BackendMode::PrimaryAgent, "session initialized");
                    return Ok(Self {
                        mode: BackendMode::PrimaryAgent,
                        agent: Some(agent),
                        direct: OnceCell::new(),
                        provider,
                        credential,
                    });
                }
                Err(e) => {
                    warn!(error = %e, "agent backend construction failed, trying direct backend");
                    agent_failure = Some(e.to_string());
                }
            }
        }

        let mut direct_failure = None;
        if provider.direct_available() {
            match provider.build_direct(&credential) {
                Ok(direct) => {
                    info!(mode = %BackendMode::SecondaryDirect, "session initialized");
                    return Ok(Self {
                        mode: BackendMode::SecondaryDirect,
                        agent: None,
                        direct: OnceCell::new_with(Some(direct)),
                        provider,
                        credential,
                    });
                }
                Err(e) => {
                    warn!(error = %e, "direct backend construction failed");
                    direct_failure = Some(e.to_string());
                }
            }
        }

        Err(AppError::BackendUnavailable {
            agent: agent_failure.unwrap_or_else(|| "not available".to_string()),
            direct: direct_failure.unwrap_or_else(|| "not available".to_string()),
        })
    }

    /// Assemble a session from already-constructed parts
    pub fn from_parts(
        mode: BackendMode,
        agent: Option<Arc<dyn AgentBackend>>,
        direct: Option<Arc<dyn DirectBackend>>,
        provider: Arc<dyn BackendProvider>,
        credential: Credential,
    ) -> Self {
        Self {
            mode,
            agent,
            direct: OnceCell::new_with(direct),
            provider,
            credential,
        }
    }

    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    pub(crate) fn agent(&self) -> Option<&Arc<dyn AgentBackend>> {
        self.agent.as_ref()
    }

    /// Whether a direct backend exists or could still be constructed
    pub(crate) fn direct_capability(&self) -> bool {
        self.direct.initialized() || self.provider.direct_available()
    }

    /// The direct backend handle, constructed on first use and cached
    pub(crate) async fn direct_backend(&self) -> Result<Arc<dyn DirectBackend>> {
        if !self.direct_capability() {
            return Err(AppError::BackendRequest(
                "no direct generation backend is available".to_string(),
            ));
        }
        let backend = self
            .direct
            .get_or_try_init(|| async { self.provider.build_direct(&self.credential) })
            .await?;
        Ok(backend.clone())
    }
}
