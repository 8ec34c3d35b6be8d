//! Backend capability seams

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::backend::chunk::ResponseChunk;
use crate::config::Credential;
use crate::error::Result;

/// Finite, ordered stream of incremental response chunks
pub type ChunkStream = BoxStream<'static, Result<ResponseChunk>>;

/// Primary capability: agent-style generation that may stream partial results
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Issue one request carrying `message` and yield its chunks as they arrive
    async fn run(&self, message: &str) -> Result<ChunkStream>;
}

/// Secondary capability: one prompt in, one completed text result out
#[async_trait]
pub trait DirectBackend: Send + Sync {
    async fn generate(&self, message: &str) -> Result<String>;
}

/// Feature-detection results and client constructors, injected into session
/// initialization so availability combinations stay deterministic under test.
pub trait BackendProvider: Send + Sync {
    fn agent_available(&self) -> bool;
    fn direct_available(&self) -> bool;
    fn build_agent(&self, credential: &Credential) -> Result<Arc<dyn AgentBackend>>;
    fn build_direct(&self, credential: &Credential) -> Result<Arc<dyn DirectBackend>>;
}
