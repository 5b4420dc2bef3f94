//! Provider selection and the resolved per-run request configuration.

use std::fmt;
use std::str::FromStr;

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use super::{anthropic, openai, GenerationError};

/// Supported provider APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Anthropic Messages API
    #[serde(rename = "anthropic")]
    Anthropic,

    /// OpenAI-compatible chat completions (OpenWebUI, Ollama front-ends, ...)
    #[serde(rename = "openai", alias = "openwebui")]
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => anthropic::DEFAULT_ENDPOINT,
            ProviderKind::OpenAi => openai::DEFAULT_ENDPOINT,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => anthropic::DEFAULT_MODEL,
            ProviderKind::OpenAi => openai::DEFAULT_MODEL,
        }
    }

    /// Environment variable holding the credential
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => anthropic::API_KEY_ENV,
            ProviderKind::OpenAi => openai::API_KEY_ENV,
        }
    }

    fn default_max_tokens(&self) -> Option<u32> {
        match self {
            ProviderKind::Anthropic => Some(anthropic::DEFAULT_MAX_TOKENS),
            ProviderKind::OpenAi => None,
        }
    }

    fn headers(&self, api_key: &str) -> Result<HeaderMap, GenerationError> {
        match self {
            ProviderKind::Anthropic => anthropic::headers(api_key),
            ProviderKind::OpenAi => openai::headers(api_key),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    /// Accepts the interactive menu numbers as well as names
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "2" | "openai" | "openwebui" => Ok(ProviderKind::OpenAi),
            _ => anyhow::bail!("Unknown provider: {}", s),
        }
    }
}

/// Per-provider settings before a credential is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub api_key_env: String,
}

impl ProviderSettings {
    /// Built-in defaults for a provider
    pub fn defaults(kind: ProviderKind) -> Self {
        Self {
            endpoint: kind.default_endpoint().to_string(),
            model: kind.default_model().to_string(),
            max_tokens: kind.default_max_tokens(),
            api_key_env: kind.api_key_env().to_string(),
        }
    }
}

/// Fully resolved provider configuration, fixed for the whole run
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub endpoint: String,
    pub headers: HeaderMap,
    pub model: String,
    pub max_tokens: Option<u32>,
}

impl ProviderConfig {
    /// Resolve a provider, reading its credential from the environment
    pub fn resolve(
        kind: ProviderKind,
        settings: &ProviderSettings,
        model_override: Option<&str>,
    ) -> Result<Self, GenerationError> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingCredential(settings.api_key_env.clone()))?;

        Self::with_credential(kind, settings, model_override, &api_key)
    }

    /// Resolve a provider with an explicit credential
    ///
    /// An empty or whitespace-only model override falls back to the
    /// configured model.
    pub fn with_credential(
        kind: ProviderKind,
        settings: &ProviderSettings,
        model_override: Option<&str>,
        api_key: &str,
    ) -> Result<Self, GenerationError> {
        if settings.endpoint.trim().is_empty() {
            return Err(GenerationError::InvalidConfig(format!(
                "{} endpoint is empty",
                kind
            )));
        }

        let model = model_override
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(settings.model.as_str())
            .to_string();

        Ok(Self {
            kind,
            endpoint: settings.endpoint.clone(),
            headers: kind.headers(api_key)?,
            model,
            max_tokens: settings.max_tokens,
        })
    }

    /// Build the JSON body for a single-turn prompt
    pub fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        }
    }
}

/// Request body shared by both provider APIs
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("1".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        assert_eq!("2".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(" OpenWebUI ".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!("3".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_defaults() {
        let anthropic = ProviderSettings::defaults(ProviderKind::Anthropic);
        assert_eq!(anthropic.endpoint, "https://api.anthropic.com/v1/messages");
        assert_eq!(anthropic.model, "claude-3-sonnet-20240229");
        assert_eq!(anthropic.max_tokens, Some(1000));
        assert_eq!(anthropic.api_key_env, "ANTHROPIC_API_KEY");

        let openai = ProviderSettings::defaults(ProviderKind::OpenAi);
        assert_eq!(openai.model, "llama3:405b");
        assert_eq!(openai.max_tokens, None);
        assert_eq!(openai.api_key_env, "OPENWEBUI_KEY");
    }

    #[test]
    fn test_empty_model_override_uses_default() {
        let settings = ProviderSettings::defaults(ProviderKind::Anthropic);

        let config =
            ProviderConfig::with_credential(ProviderKind::Anthropic, &settings, Some("  "), "k")
                .unwrap();
        assert_eq!(config.model, "claude-3-sonnet-20240229");

        let config = ProviderConfig::with_credential(
            ProviderKind::Anthropic,
            &settings,
            Some("claude-3-haiku-20240307"),
            "k",
        )
        .unwrap();
        assert_eq!(config.model, "claude-3-haiku-20240307");
    }

    #[test]
    fn test_missing_credential() {
        let settings = ProviderSettings {
            api_key_env: "DISTILLERY_TEST_UNSET_KEY".to_string(),
            ..ProviderSettings::defaults(ProviderKind::OpenAi)
        };

        let err = ProviderConfig::resolve(ProviderKind::OpenAi, &settings, None).unwrap_err();
        assert!(
            matches!(err, GenerationError::MissingCredential(ref name) if name == "DISTILLERY_TEST_UNSET_KEY")
        );
    }

    #[test]
    fn test_request_body_with_max_tokens() {
        let settings = ProviderSettings::defaults(ProviderKind::Anthropic);
        let config =
            ProviderConfig::with_credential(ProviderKind::Anthropic, &settings, None, "k").unwrap();

        let body = serde_json::to_value(config.request_body("hello")).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "claude-3-sonnet-20240229",
                "messages": [{"role": "user", "content": "hello"}],
                "max_tokens": 1000
            })
        );
    }

    #[test]
    fn test_request_body_without_max_tokens() {
        let settings = ProviderSettings::defaults(ProviderKind::OpenAi);
        let config =
            ProviderConfig::with_credential(ProviderKind::OpenAi, &settings, None, "k").unwrap();

        let body = serde_json::to_value(config.request_body("hello")).unwrap();
        assert!(body.get("max_tokens").is_none());
        assert_eq!(body["model"], "llama3:405b");
    }
}
