//! HTTP request executor for the configured provider.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::normalize::{normalize_response, ResponseShape};
use super::{Completion, GenerationError, ProviderConfig};

/// Client for a single resolved provider
pub struct LlmClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Create a client with the default HTTP settings
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client on top of a preconfigured reqwest client
    pub fn with_http_client(config: ProviderConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// POST a prompt and return the raw JSON response
    ///
    /// Non-success statuses are logged with their body and returned as
    /// [`GenerationError::Http`]. Failures are logged at warn; the caller
    /// decides whether they are fatal and logs the error itself.
    #[instrument(skip(self, prompt), fields(provider = %self.config.kind, model = %self.config.model))]
    pub async fn request(&self, prompt: &str) -> Result<Value, GenerationError> {
        info!("Making API request");

        let response = self
            .http
            .post(&self.config.endpoint)
            .headers(self.config.headers.clone())
            .json(&self.config.request_body(prompt))
            .send()
            .await
            .map_err(|source| {
                warn!(error = %source, "API request failed");
                warn!("Response content: no response");
                GenerationError::Transport {
                    endpoint: self.config.endpoint.clone(),
                    source,
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| {
                warn!(%status, error = %source, "API request failed");
                warn!("Response content: unreadable body");
                GenerationError::Transport {
                    endpoint: self.config.endpoint.clone(),
                    source,
                }
            })?;

        if !status.is_success() {
            warn!(%status, "API request failed");
            warn!(body = %body, "Response content");
            return Err(GenerationError::Http { status, body });
        }

        debug!(body = %body, "API response");
        info!("API request completed");

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, body = %body, "Response is not valid JSON");
            GenerationError::UnexpectedResponse(format!("response is not JSON: {}", e))
        })
    }
}

#[async_trait]
impl Completion for LlmClient {
    fn name(&self) -> &str {
        self.config.kind.as_str()
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let value = self.request(prompt).await?;

        if let Some(shape) = ResponseShape::detect(&value) {
            if shape.provider() != self.config.kind {
                warn!(
                    configured = %self.config.kind,
                    detected = %shape.provider(),
                    "Response shape does not match the configured provider"
                );
            }
        }

        normalize_response(&value)
    }
}
