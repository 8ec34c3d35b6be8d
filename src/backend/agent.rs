//! Primary agent backend: streaming generation over SSE

use std::collections::VecDeque;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use reqwest::Client;
use tracing::{debug, warn};

use crate::backend::chunk::ResponseChunk;
use crate::backend::traits::{AgentBackend, ChunkStream};
use crate::backend::wire::{GenerateContentRequest, GenerationConfig};
use crate::config::{BackendSettings, Credential};
use crate::error::{AppError, Result};

/// Agent client bound to a fixed model, name, and system instruction.
///
/// The streaming operation returns server-sent events whose `data:` payloads
/// each carry one incremental generation response.
pub struct GeminiAgentBackend {
    name: String,
    model: String,
    instruction: String,
    base_url: String,
    generation_config: GenerationConfig,
    client: Client,
    credential: Credential,
}

impl GeminiAgentBackend {
    pub fn new(settings: &BackendSettings, credential: &Credential) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            name: settings.agent_name.clone(),
            model: settings.agent_model.clone(),
            instruction: settings.instruction.clone(),
            base_url: settings.base_url.clone(),
            generation_config: GenerationConfig {
                temperature: settings.temperature,
                max_output_tokens: settings.max_output_tokens,
            },
            client,
            credential: credential.clone(),
        })
    }
}

#[async_trait]
impl AgentBackend for GeminiAgentBackend {
    async fn run(&self, message: &str) -> Result<ChunkStream> {
        let url = format!(
            "{}/models/{}:streamGenerateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        debug!(agent = %self.name, model = %self.model, "sending streaming generation request");

        let request = GenerateContentRequest::for_message(
            message,
            Some(&self.instruction),
            self.generation_config.clone(),
        );

        let response = self
            .client
            .post(&url)
            .query(&[("alt", "sse"), ("key", self.credential.expose())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(agent = %self.name, status = %status, "agent request rejected");
            return Err(AppError::BackendRequest(format!(
                "agent backend returned {status}: {body}"
            )));
        }

        Ok(sse_chunks(response))
    }
}

struct SseState {
    body: BoxStream<'static, reqwest::Result<Vec<u8>>>,
    buffer: String,
    pending: VecDeque<ResponseChunk>,
    done: bool,
}

/// Turn an SSE response body into a chunk stream.
///
/// Chunks are surfaced as soon as their line is complete; the consumer never
/// waits for the whole body.
fn sse_chunks(response: reqwest::Response) -> ChunkStream {
    let body = response
        .bytes_stream()
        .map(|result| result.map(|bytes| bytes.to_vec()))
        .boxed();

    let state = SseState {
        body,
        buffer: String::new(),
        pending: VecDeque::new(),
        done: false,
    };

    stream::try_unfold(state, |mut state| async move {
        loop {
            if let Some(chunk) = state.pending.pop_front() {
                return Ok(Some((chunk, state)));
            }
            if state.done {
                return Ok(None);
            }
            match state.body.next().await {
                Some(Ok(bytes)) => {
                    state.buffer.push_str(&String::from_utf8_lossy(&bytes));
                    drain_complete_lines(&mut state.buffer, &mut state.pending);
                }
                Some(Err(e)) => return Err(AppError::HttpClient(e)),
                None => {
                    state.done = true;
                    flush_tail(&mut state.buffer, &mut state.pending);
                }
            }
        }
    })
    .boxed()
}

fn drain_complete_lines(buffer: &mut String, pending: &mut VecDeque<ResponseChunk>) {
    while let Some(pos) = buffer.find('\n') {
        let line: String = buffer.drain(..=pos).collect();
        push_data_line(line.trim_end_matches(['\r', '\n']), pending);
    }
}

fn flush_tail(buffer: &mut String, pending: &mut VecDeque<ResponseChunk>) {
    let line = std::mem::take(buffer);
    push_data_line(line.trim_end_matches('\r'), pending);
}

/// Queue the chunks of one SSE line; non-`data:` lines carry no payload.
fn push_data_line(line: &str, pending: &mut VecDeque<ResponseChunk>) {
    let Some(payload) = line.strip_prefix("data:") else {
        return;
    };
    let payload = payload.trim();
    if payload.is_empty() {
        return;
    }
    pending.extend(ResponseChunk::from_payload(payload));
}
