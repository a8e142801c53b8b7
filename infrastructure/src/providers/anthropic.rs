//! Anthropic Messages API (`/v1/messages`)

use super::http::{WireRequest, parse_json, token_count};
use council_application::GeneratorError;
use council_domain::Generation;
use serde_json::{Value, json};

pub const API_VERSION: &str = "2023-06-01";

pub fn request(model: &str, api_key: &str, prompt: &str, temperature: f64, max_tokens: u32) -> WireRequest {
    WireRequest {
        path: "/v1/messages".to_string(),
        headers: vec![
            ("x-api-key", api_key.to_string()),
            ("anthropic-version", API_VERSION.to_string()),
        ],
        body: json!({
            "model": model,
            "max_tokens": max_tokens,
            "temperature": temperature,
            "messages": [{"role": "user", "content": prompt}],
        }),
    }
}

/// Concatenates every `text` block of the response content.
pub fn parse_response(body: &str) -> Result<Generation, GeneratorError> {
    let value = parse_json(body)?;
    let blocks = value
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| GeneratorError::InvalidResponse("missing content".to_string()))?;

    let text: String = blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect();

    Ok(Generation::new(
        text,
        token_count(&value, "/usage/input_tokens"),
        token_count(&value, "/usage/output_tokens"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers() {
        let req = request("claude-sonnet-4-5", "key", "q", 0.7, 50);
        assert_eq!(req.path, "/v1/messages");
        assert!(req.headers.contains(&("x-api-key", "key".to_string())));
        assert!(req.headers.contains(&("anthropic-version", API_VERSION.to_string())));
        assert_eq!(req.body["max_tokens"], 50);
    }

    #[test]
    fn test_parse_joins_text_blocks() {
        let body = r#"{
            "content": [
                {"type": "text", "text": "Rain is "},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "condensation."}
            ],
            "usage": {"input_tokens": 20, "output_tokens": 6}
        }"#;
        assert_eq!(
            parse_response(body).unwrap(),
            Generation::new("Rain is condensation.", 20, 6)
        );
    }

    #[test]
    fn test_missing_content_is_invalid() {
        assert!(matches!(
            parse_response(r#"{"type": "error"}"#),
            Err(GeneratorError::InvalidResponse(_))
        ));
    }
}
