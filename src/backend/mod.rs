//! Backend module - capability traits, HTTP clients, and chunk normalization

pub mod agent;
pub mod chunk;
pub mod direct;
pub mod provider;
pub mod traits;
pub mod wire;

// Re-export backend types for convenience
pub use agent::GeminiAgentBackend;
pub use chunk::{assemble_reply, ResponseChunk, EMPTY_RESPONSE_APOLOGY};
pub use direct::GeminiDirectBackend;
pub use provider::HttpBackendProvider;
pub use traits::{AgentBackend, BackendProvider, ChunkStream, DirectBackend};
