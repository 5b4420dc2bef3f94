//! OpenAI-compatible chat completions wire details (OpenWebUI, etc).

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use super::GenerationError;

pub const DEFAULT_ENDPOINT: &str = "http://openapi.example/api/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3:405b";
pub const API_KEY_ENV: &str = "OPENWEBUI_KEY";

/// Build the bearer auth headers for a request
pub fn headers(api_key: &str) -> Result<HeaderMap, GenerationError> {
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| GenerationError::InvalidConfig("API key is not a valid header value".into()))?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Pull the first choice's message text out of a chat completion
///
/// Shape: `{"choices": [{"message": {"role": "assistant", "content": "..."}}], ...}`
pub fn extract_text(value: &Value) -> Option<&str> {
    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headers() {
        let headers = headers("owui-key").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer owui-key");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_extract_text() {
        let response = json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Wind Power"},
                "finish_reason": "stop"
            }]
        });
        assert_eq!(extract_text(&response), Some("Wind Power"));
    }

    #[test]
    fn test_extract_text_missing_message() {
        assert_eq!(extract_text(&json!({"choices": [{"index": 0}]})), None);
    }
}
