//! Adapters for LLM completion APIs.
//!
//! Two wire shapes are supported: the Anthropic Messages API and the
//! OpenAI-compatible chat completions API (OpenWebUI and friends).
//! Everything above this module talks to a [`Completion`], so the pipeline
//! never sees provider-shaped JSON.

pub mod anthropic;
pub mod client;
pub mod normalize;
pub mod openai;
pub mod provider;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

pub use client::LlmClient;
pub use normalize::{normalize_response, ResponseShape};
pub use provider::{ChatMessage, ChatRequest, ProviderConfig, ProviderKind, ProviderSettings};

/// Errors raised while requesting or decoding a completion
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("Environment variable {0} is not set")]
    MissingCredential(String),

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),
}

/// Something that turns a prompt into normalized response text
#[async_trait]
pub trait Completion: Send + Sync {
    /// Human-readable source name (used in logs)
    fn name(&self) -> &str;

    /// Send a single prompt and return the trimmed response text
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}
