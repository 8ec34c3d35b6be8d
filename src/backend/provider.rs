//! Capability detection and construction of the concrete HTTP backends

use std::sync::Arc;

use crate::backend::agent::GeminiAgentBackend;
use crate::backend::direct::GeminiDirectBackend;
use crate::backend::traits::{AgentBackend, BackendProvider, DirectBackend};
use crate::config::{BackendSettings, Credential};
use crate::error::Result;

/// Provider backed by the configured hosted generation API.
///
/// Availability is a local configuration check; no network call happens
/// before the first message.
pub struct HttpBackendProvider {
    settings: BackendSettings,
}

impl HttpBackendProvider {
    pub fn new(settings: BackendSettings) -> Self {
        Self { settings }
    }
}

impl BackendProvider for HttpBackendProvider {
    fn agent_available(&self) -> bool {
        self.settings.agent_enabled
    }

    fn direct_available(&self) -> bool {
        self.settings.direct_enabled
    }

    fn build_agent(&self, credential: &Credential) -> Result<Arc<dyn AgentBackend>> {
        let backend = GeminiAgentBackend::new(&self.settings, credential)?;
        Ok(Arc::new(backend))
    }

    fn build_direct(&self, credential: &Credential) -> Result<Arc<dyn DirectBackend>> {
        let backend = GeminiDirectBackend::new(&self.settings, credential)?;
        Ok(Arc::new(backend))
    }
}
