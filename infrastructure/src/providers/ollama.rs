//! Local Ollama runtime (`/api/chat`, non-streaming)

use super::http::{WireRequest, parse_json, token_count};
use council_application::GeneratorError;
use council_domain::Generation;
use serde_json::{Value, json};

pub fn request(model: &str, prompt: &str, temperature: f64, max_tokens: u32) -> WireRequest {
    WireRequest {
        path: "/api/chat".to_string(),
        headers: Vec::new(),
        body: json!({
            "model": model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
            "options": {
                "temperature": temperature,
                "num_predict": max_tokens,
            },
        }),
    }
}

pub fn parse_response(body: &str) -> Result<Generation, GeneratorError> {
    let value = parse_json(body)?;
    let text = value
        .pointer("/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| GeneratorError::InvalidResponse("missing message.content".to_string()))?;

    Ok(Generation::new(
        text,
        token_count(&value, "/prompt_eval_count"),
        token_count(&value, "/eval_count"),
    ))
}
