//! Secondary direct-generation backend: one prompt, one completed result

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::backend::traits::DirectBackend;
use crate::backend::wire::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::config::{BackendSettings, Credential};
use crate::error::{AppError, Result};

/// Direct generation client bound to a fixed model identifier
pub struct GeminiDirectBackend {
    model: String,
    base_url: String,
    generation_config: GenerationConfig,
    client: Client,
    credential: Credential,
}

impl GeminiDirectBackend {
    pub fn new(settings: &BackendSettings, credential: &Credential) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            model: settings.direct_model.clone(),
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
impl DirectBackend for GeminiDirectBackend {
    async fn generate(&self, message: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        debug!(model = %self.model, "sending direct generation request");

        let request =
            GenerateContentRequest::for_message(message, None, self.generation_config.clone());

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.credential.expose())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(model = %self.model, status = %status, "direct request rejected");
            return Err(AppError::BackendRequest(format!(
                "direct backend returned {status}: {body}"
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            AppError::BackendRequest(format!("failed to parse generation response: {e}"))
        })?;

        body.first_candidate_text().ok_or_else(|| {
            AppError::BackendRequest("generation response contained no text".to_string())
        })
    }
}
