//! Shared HTTP transport for hosted providers

use council_application::GeneratorError;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest error body kept in a [`GeneratorError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 500;

/// A prepared provider call: path relative to the base URL, extra headers, JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Value,
}

/// reqwest client with a per-call timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeneratorError::Http(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `request` to `base_url` and return the response body text.
    ///
    /// Non-2xx statuses become [`GeneratorError::Status`].
    pub async fn post(&self, base_url: &str, request: &WireRequest) -> Result<String, GeneratorError> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), request.path);
        debug!("POST {}", url);

        let mut builder = self.client.post(&url).json(&request.body);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let body: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(GeneratorError::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(text)
    }
}

fn map_reqwest_error(error: reqwest::Error) -> GeneratorError {
    if error.is_timeout() {
        GeneratorError::Timeout
    } else {
        GeneratorError::Http(error.to_string())
    }
}

/// Parse a response body as JSON.
pub(crate) fn parse_json(body: &str) -> Result<Value, GeneratorError> {
    serde_json::from_str(body).map_err(|e| GeneratorError::InvalidResponse(e.to_string()))
}

/// Token count at `pointer`, 0 when absent.
pub(crate) fn token_count(value: &Value, pointer: &str) -> u64 {
    value.pointer(pointer).and_then(Value::as_u64).unwrap_or(0)
}
