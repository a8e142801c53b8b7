//! Cohere Chat v2 (`/v2/chat`)

use super::http::{WireRequest, parse_json, token_count};
use council_application::GeneratorError;
use council_domain::Generation;
use serde_json::{Value, json};

pub fn request(model: &str, api_key: &str, prompt: &str, temperature: f64, max_tokens: u32) -> WireRequest {
    WireRequest {
        path: "/v2/chat".to_string(),
        headers: vec![("Authorization", format!("Bearer {}", api_key))],
        body: json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": temperature,
            "max_tokens": max_tokens,
        }),
    }
}

pub fn parse_response(body: &str) -> Result<Generation, GeneratorError> {
    let value = parse_json(body)?;
    let content = value
        .pointer("/message/content")
        .and_then(Value::as_array)
        .ok_or_else(|| GeneratorError::InvalidResponse("missing message.content".to_string()))?;

    let text: String = content
        .iter()
        .filter_map(|item| item.get("text").and_then(Value::as_str))
        .collect();

    Ok(Generation::new(
        text,
        token_count(&value, "/usage/tokens/input_tokens"),
        token_count(&value, "/usage/tokens/output_tokens"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "message": {"role": "assistant", "content": [{"type": "text", "text": "Evaporation."}]},
            "usage": {"tokens": {"input_tokens": 7, "output_tokens": 2}}
        }"#;
        assert_eq!(parse_response(body).unwrap(), Generation::new("Evaporation.", 7, 2));
    }

    #[test]
    fn test_missing_message_is_invalid() {
        assert!(parse_response(r#"{"finish_reason": "ERROR"}"#).is_err());
    }
}
