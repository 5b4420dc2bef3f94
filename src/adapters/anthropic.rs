//! Anthropic Messages API wire details.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use super::GenerationError;

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const API_VERSION: &str = "2023-06-01";

/// The Messages API rejects requests without `max_tokens`
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Build the auth and version headers for a request
pub fn headers(api_key: &str) -> Result<HeaderMap, GenerationError> {
    let mut key = HeaderValue::from_str(api_key)
        .map_err(|_| GenerationError::InvalidConfig("API key is not a valid header value".into()))?;
    key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static("x-api-key"), key);
    headers.insert(
        HeaderName::from_static("anthropic-version"),
        HeaderValue::from_static(API_VERSION),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Pull the first content block's text out of a Messages response
///
/// Shape: `{"content": [{"type": "text", "text": "..."}], ...}`
pub fn extract_text(value: &Value) -> Option<&str> {
    value.pointer("/content/0/text").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headers() {
        let headers = headers("sk-test").unwrap();
        assert_eq!(headers["x-api-key"], "sk-test");
        assert!(headers["x-api-key"].is_sensitive());
        assert_eq!(headers["anthropic-version"], API_VERSION);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_headers_reject_newline_in_key() {
        assert!(matches!(
            headers("bad\nkey"),
            Err(GenerationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_extract_text() {
        let response = json!({
            "id": "msg_01",
            "type": "message",
            "content": [{"type": "text", "text": "Solar Energy"}],
            "stop_reason": "end_turn"
        });
        assert_eq!(extract_text(&response), Some("Solar Energy"));
    }

    #[test]
    fn test_extract_text_empty_content() {
        assert_eq!(extract_text(&json!({"content": []})), None);
    }
}
