//! HTTP-backed generator, one per configured provider

use super::http::{HttpTransport, WireRequest};
use super::{anthropic, cohere, gemini, ollama, openai};
use async_trait::async_trait;
use council_application::{Generator, GeneratorError};
use council_domain::{Generation, ProviderId};
use tracing::debug;

/// Wire format spoken by a provider endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    OpenAiChat,
    AnthropicMessages,
    GeminiGenerate,
    CohereChat,
    OllamaChat,
}

impl ApiFormat {
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ApiFormat::OllamaChat)
    }

    fn request(
        &self,
        model: &str,
        api_key: &str,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> WireRequest {
        match self {
            ApiFormat::OpenAiChat => openai::request(model, api_key, prompt, temperature, max_tokens),
            ApiFormat::AnthropicMessages => {
                anthropic::request(model, api_key, prompt, temperature, max_tokens)
            }
            ApiFormat::GeminiGenerate => gemini::request(model, api_key, prompt, temperature, max_tokens),
            ApiFormat::CohereChat => cohere::request(model, api_key, prompt, temperature, max_tokens),
            ApiFormat::OllamaChat => ollama::request(model, prompt, temperature, max_tokens),
        }
    }

    fn parse(&self, body: &str) -> Result<Generation, GeneratorError> {
        match self {
            ApiFormat::OpenAiChat => openai::parse_response(body),
            ApiFormat::AnthropicMessages => anthropic::parse_response(body),
            ApiFormat::GeminiGenerate => gemini::parse_response(body),
            ApiFormat::CohereChat => cohere::parse_response(body),
            ApiFormat::OllamaChat => ollama::parse_response(body),
        }
    }
}

/// [`Generator`] over a provider's HTTP API.
pub struct HttpGenerator {
    provider: ProviderId,
    format: ApiFormat,
    base_url: String,
    model: String,
    api_key: Option<String>,
    enabled: bool,
    transport: HttpTransport,
}

impl HttpGenerator {
    pub fn new(
        provider: ProviderId,
        format: ApiFormat,
        base_url: impl Into<String>,
        model: impl Into<String>,
        transport: HttpTransport,
    ) -> Self {
        Self {
            provider,
            format,
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            enabled: true,
            transport,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    fn provider(&self) -> &ProviderId {
        &self.provider
    }

    fn is_ready(&self) -> bool {
        self.enabled && (!self.format.requires_api_key() || self.api_key.is_some())
    }

    async fn generate(
        &self,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Generation, GeneratorError> {
        if !self.is_ready() {
            return Err(GeneratorError::NotConfigured(self.provider.to_string()));
        }

        let api_key = self.api_key.as_deref().unwrap_or_default();
        let request = self
            .format
            .request(&self.model, api_key, prompt, temperature, max_tokens);

        debug!("Calling {} ({})", self.provider, self.model);
        let body = self.transport.post(&self.base_url, &request).await?;
        self.format.parse(&body)
    }
}
