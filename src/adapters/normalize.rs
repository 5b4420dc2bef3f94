//! Response normalization.
//!
//! Provider responses are reduced to plain text right after receipt. The
//! shape is detected from the top-level field: `content` for the Messages
//! API, `choices` for chat completions.

use serde_json::Value;

use super::{anthropic, openai, GenerationError, ProviderKind};

/// Known response shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `{"content": [{"text": ...}]}`
    Messages,
    /// `{"choices": [{"message": {"content": ...}}]}`
    ChatCompletions,
}

impl ResponseShape {
    /// Detect the shape by top-level field presence
    pub fn detect(value: &Value) -> Option<Self> {
        if value.get("content").is_some() {
            Some(Self::Messages)
        } else if value.get("choices").is_some() {
            Some(Self::ChatCompletions)
        } else {
            None
        }
    }

    /// The provider that produces this shape
    pub fn provider(self) -> ProviderKind {
        match self {
            Self::Messages => ProviderKind::Anthropic,
            Self::ChatCompletions => ProviderKind::OpenAi,
        }
    }
}

/// Extract the first message's text, trimmed
pub fn normalize_response(value: &Value) -> Result<String, GenerationError> {
    let text = match ResponseShape::detect(value) {
        Some(ResponseShape::Messages) => anthropic::extract_text(value),
        Some(ResponseShape::ChatCompletions) => openai::extract_text(value),
        None => None,
    };

    text.map(|t| t.trim().to_string())
        .ok_or_else(|| GenerationError::UnexpectedResponse(preview(value)))
}

/// Short rendering of a response for error messages
fn preview(value: &Value) -> String {
    const MAX_CHARS: usize = 200;

    let rendered = value.to_string();
    if rendered.chars().count() <= MAX_CHARS {
        rendered
    } else {
        let cut: String = rendered.chars().take(MAX_CHARS).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages_shape() {
        let value = json!({"content": [{"text": "X"}]});
        assert_eq!(ResponseShape::detect(&value), Some(ResponseShape::Messages));
        assert_eq!(normalize_response(&value).unwrap(), "X");
    }

    #[test]
    fn test_chat_completions_shape() {
        let value = json!({"choices": [{"message": {"content": "Y"}}]});
        assert_eq!(
            ResponseShape::detect(&value),
            Some(ResponseShape::ChatCompletions)
        );
        assert_eq!(normalize_response(&value).unwrap(), "Y");
    }

    #[test]
    fn test_text_is_trimmed() {
        let value = json!({"content": [{"text": "\n  Solar Energy \n"}]});
        assert_eq!(normalize_response(&value).unwrap(), "Solar Energy");
    }

    #[test]
    fn test_unknown_shape_is_lookup_error() {
        let value = json!({"type": "error", "error": {"message": "overloaded"}});
        assert_eq!(ResponseShape::detect(&value), None);

        let err = normalize_response(&value).unwrap_err();
        assert!(matches!(err, GenerationError::UnexpectedResponse(ref s) if s.contains("overloaded")));
    }

    #[test]
    fn test_detected_shape_missing_text() {
        let value = json!({"content": [{"type": "tool_use"}]});
        assert!(matches!(
            normalize_response(&value),
            Err(GenerationError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_preview_truncates() {
        let value = json!({"blob": "a".repeat(500)});
        let err = normalize_response(&value).unwrap_err().to_string();
        assert!(err.ends_with("..."));
        assert!(err.len() < 300);
    }

    #[test]
    fn test_shape_provider() {
        assert_eq!(ResponseShape::Messages.provider(), ProviderKind::Anthropic);
        assert_eq!(ResponseShape::ChatCompletions.provider(), ProviderKind::OpenAi);
    }
}
