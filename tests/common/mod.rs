//! Shared scripted backends for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;

use chat_relay_gateway::backend::{
    AgentBackend, BackendProvider, ChunkStream, DirectBackend, ResponseChunk,
};
use chat_relay_gateway::config::Credential;
use chat_relay_gateway::error::{AppError, Result};

pub fn credential() -> Credential {
    Credential::resolve(Some("test-key".to_string())).unwrap()
}

/// What a scripted agent does when asked to run
pub enum AgentScript {
    Chunks(Vec<Value>),
    FailAtRequest(String),
    FailMidStream { chunks: Vec<Value>, error: String },
}

pub struct ScriptedAgent(pub AgentScript);

#[async_trait]
impl AgentBackend for ScriptedAgent {
    async fn run(&self, _message: &str) -> Result<ChunkStream> {
        match &self.0 {
            AgentScript::FailAtRequest(message) => {
                Err(AppError::BackendRequest(message.clone()))
            }
            AgentScript::Chunks(values) => {
                let items: Vec<Result<ResponseChunk>> = values
                    .iter()
                    .cloned()
                    .map(|value| Ok(ResponseChunk::new(value)))
                    .collect();
                Ok(stream::iter(items).boxed())
            }
            AgentScript::FailMidStream { chunks, error } => {
                let mut items: Vec<Result<ResponseChunk>> = chunks
                    .iter()
                    .cloned()
                    .map(|value| Ok(ResponseChunk::new(value)))
                    .collect();
                items.push(Err(AppError::BackendRequest(error.clone())));
                Ok(stream::iter(items).boxed())
            }
        }
    }
}

/// Direct backend that returns a fixed reply or failure
pub struct ScriptedDirect(pub std::result::Result<String, String>);

#[async_trait]
impl DirectBackend for ScriptedDirect {
    async fn generate(&self, _message: &str) -> Result<String> {
        match &self.0 {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(AppError::BackendRequest(message.clone())),
        }
    }
}

/// Provider whose capabilities and construction outcomes are scripted.
///
/// `None` marks the capability unavailable; `Some(Err(..))` makes client
/// construction fail.
pub struct ScriptedProvider {
    pub agent: Option<std::result::Result<Arc<ScriptedAgent>, String>>,
    pub direct: Option<std::result::Result<Arc<ScriptedDirect>, String>>,
}

impl ScriptedProvider {
    pub fn unavailable() -> Self {
        Self {
            agent: None,
            direct: None,
        }
    }
}

impl BackendProvider for ScriptedProvider {
    fn agent_available(&self) -> bool {
        self.agent.is_some()
    }

    fn direct_available(&self) -> bool {
        self.direct.is_some()
    }

    fn build_agent(&self, _credential: &Credential) -> Result<Arc<dyn AgentBackend>> {
        match &self.agent {
            Some(Ok(agent)) => {
                let backend: Arc<dyn AgentBackend> = agent.clone();
                Ok(backend)
            }
            Some(Err(message)) => Err(AppError::Internal(message.clone())),
            None => Err(AppError::Internal(
                "agent capability not available".to_string(),
            )),
        }
    }

    fn build_direct(&self, _credential: &Credential) -> Result<Arc<dyn DirectBackend>> {
        match &self.direct {
            Some(Ok(direct)) => {
                let backend: Arc<dyn DirectBackend> = direct.clone();
                Ok(backend)
            }
            Some(Err(message)) => Err(AppError::Internal(message.clone())),
            None => Err(AppError::Internal(
                "direct capability not available".to_string(),
            )),
        }
    }
}

pub fn ok_agent(values: Vec<Value>) -> Option<std::result::Result<Arc<ScriptedAgent>, String>> {
    Some(Ok(Arc::new(ScriptedAgent(AgentScript::Chunks(values)))))
}

pub fn ok_direct(reply: &str) -> Option<std::result::Result<Arc<ScriptedDirect>, String>> {
    Some(Ok(Arc::new(ScriptedDirect(Ok(reply.to_string())))))
}
