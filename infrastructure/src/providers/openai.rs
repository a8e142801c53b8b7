//! OpenAI-compatible chat completions (`/chat/completions`)
//!
//! Spoken by OpenAI, Mistral and DeepSeek.

use super::http::{WireRequest, parse_json, token_count};
use council_application::GeneratorError;
use council_domain::Generation;
use serde_json::{Value, json};

pub fn request(model: &str, api_key: &str, prompt: &str, temperature: f64, max_tokens: u32) -> WireRequest {
    WireRequest {
        path: "/chat/completions".to_string(),
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
    let text = value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| GeneratorError::InvalidResponse("missing choices[0].message.content".to_string()))?;

    Ok(Generation::new(
        text,
        token_count(&value, "/usage/prompt_tokens"),
        token_count(&value, "/usage/completion_tokens"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = request("gpt-4o", "sk-test", "hello", 0.7, 100);
        assert_eq!(req.path, "/chat/completions");
        assert_eq!(req.headers, vec![("Authorization", "Bearer sk-test".to_string())]);
        assert_eq!(req.body["model"], "gpt-4o");
        assert_eq!(req.body["messages"][0]["content"], "hello");
        assert_eq!(req.body["max_tokens"], 100);
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Water vapor condenses."}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4}
        }"#;
        let generation = parse_response(body).unwrap();
        assert_eq!(generation, Generation::new("Water vapor condenses.", 12, 4));
    }

    #[test]
    fn test_missing_usage_counts_zero() {
        let body = r#"{"choices": [{"message": {"content": "hi"}}]}"#;
        assert_eq!(parse_response(body).unwrap(), Generation::new("hi", 0, 0));
    }

    #[test]
    fn test_missing_choices_is_invalid() {
        assert!(matches!(
            parse_response(r#"{"choices": []}"#),
            Err(GeneratorError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response("not json"),
            Err(GeneratorError::InvalidResponse(_))
        ));
    }
}
