//! Google Gemini `generateContent`

use super::http::{WireRequest, parse_json, token_count};
use council_application::GeneratorError;
use council_domain::Generation;
use serde_json::{Value, json};

pub fn request(model: &str, api_key: &str, prompt: &str, temperature: f64, max_tokens: u32) -> WireRequest {
    WireRequest {
        path: format!("/v1beta/models/{}:generateContent", model),
        headers: vec![("x-goog-api-key", api_key.to_string())],
        body: json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": temperature,
                "maxOutputTokens": max_tokens,
            },
        }),
    }
}

pub fn parse_response(body: &str) -> Result<Generation, GeneratorError> {
    let value = parse_json(body)?;
    let parts = value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .ok_or_else(|| GeneratorError::InvalidResponse("missing candidates[0].content.parts".to_string()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    Ok(Generation::new(
        text,
        token_count(&value, "/usageMetadata/promptTokenCount"),
        token_count(&value, "/usageMetadata/candidatesTokenCount"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_in_path() {
        let req = request("gemini-1.5-pro", "key", "q", 0.2, 64);
        assert_eq!(req.path, "/v1beta/models/gemini-1.5-pro:generateContent");
        assert_eq!(req.body["generationConfig"]["maxOutputTokens"], 64);
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "candidates": [{"content": {"parts": [{"text": "Clouds "}, {"text": "release water."}]}}],
            "usageMetadata": {"promptTokenCount": 9, "candidatesTokenCount": 3}
        }"#;
        assert_eq!(
            parse_response(body).unwrap(),
            Generation::new("Clouds release water.", 9, 3)
        );
    }

    #[test]
    fn test_blocked_prompt_is_invalid() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert!(matches!(
            parse_response(body),
            Err(GeneratorError::InvalidResponse(_))
        ));
    }
}
