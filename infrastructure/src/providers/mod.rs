//! Provider adapters
//!
//! Every built-in provider is reached over HTTP with reqwest. The module
//! holds one wire-format codec per API family and [`build_registry`], which
//! turns the `[providers]` configuration into a [`GeneratorRegistry`].

mod anthropic;
mod cohere;
mod gemini;
mod generator;
mod http;
mod ollama;
mod openai;

pub use generator::{ApiFormat, HttpGenerator};
pub use http::{HttpTransport, WireRequest};

use crate::config::{FileProviderConfig, FileProvidersConfig};
use council_application::{Generator, GeneratorError, GeneratorRegistry};
use council_domain::ProviderId;
use std::sync::Arc;
use tracing::debug;

/// Built-in endpoint of a hosted provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub format: ApiFormat,
    pub base_url: &'static str,
    pub model: &'static str,
    pub api_key_env: &'static str,
}

pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const OLLAMA_MODEL: &str = "llama3.1";

/// Endpoint defaults for hosted providers; `None` for Ollama and custom ids.
pub fn defaults_for(provider: &ProviderId) -> Option<ProviderDefaults> {
    let defaults = match provider {
        ProviderId::Claude => ProviderDefaults {
            format: ApiFormat::AnthropicMessages,
            base_url: "https://api.anthropic.com",
            model: "claude-sonnet-4-5",
            api_key_env: "ANTHROPIC_API_KEY",
        },
        ProviderId::Gpt4 => ProviderDefaults {
            format: ApiFormat::OpenAiChat,
            base_url: "https://api.openai.com/v1",
            model: "gpt-4o",
            api_key_env: "OPENAI_API_KEY",
        },
        ProviderId::Gemini => ProviderDefaults {
            format: ApiFormat::GeminiGenerate,
            base_url: "https://generativelanguage.googleapis.com",
            model: "gemini-1.5-pro",
            api_key_env: "GEMINI_API_KEY",
        },
        ProviderId::Mistral => ProviderDefaults {
            format: ApiFormat::OpenAiChat,
            base_url: "https://api.mistral.ai/v1",
            model: "mistral-large-latest",
            api_key_env: "MISTRAL_API_KEY",
        },
        ProviderId::Cohere => ProviderDefaults {
            format: ApiFormat::CohereChat,
            base_url: "https://api.cohere.com",
            model: "command-r-plus",
            api_key_env: "COHERE_API_KEY",
        },
        ProviderId::DeepSeek => ProviderDefaults {
            format: ApiFormat::OpenAiChat,
            base_url: "https://api.deepseek.com/v1",
            model: "deepseek-chat",
            api_key_env: "DEEPSEEK_API_KEY",
        },
        ProviderId::Ollama | ProviderId::Custom(_) => return None,
    };
    Some(defaults)
}

fn hosted_config<'a>(config: &'a FileProvidersConfig, provider: &ProviderId) -> Option<&'a FileProviderConfig> {
    match provider {
        ProviderId::Claude => Some(&config.claude),
        ProviderId::Gpt4 => Some(&config.gpt4),
        ProviderId::Gemini => Some(&config.gemini),
        ProviderId::Mistral => Some(&config.mistral),
        ProviderId::Cohere => Some(&config.cohere),
        ProviderId::DeepSeek => Some(&config.deepseek),
        ProviderId::Ollama | ProviderId::Custom(_) => None,
    }
}

/// Register a generator for every built-in provider.
///
/// Providers without an API key (or Ollama when disabled) are registered
/// but not ready, so they show up in listings and are skipped by the council.
pub fn build_registry(config: &FileProvidersConfig) -> Result<GeneratorRegistry, GeneratorError> {
    let transport = HttpTransport::new(config.request_timeout())?;
    let mut registry = GeneratorRegistry::new();

    for provider in ProviderId::BUILTIN {
        let generator = match (defaults_for(&provider), hosted_config(config, &provider)) {
            (Some(defaults), Some(overrides)) => {
                let api_key = overrides.resolve_api_key(defaults.api_key_env);
                HttpGenerator::new(
                    provider.clone(),
                    defaults.format,
                    overrides.base_url.as_deref().unwrap_or(defaults.base_url),
                    overrides.model.as_deref().unwrap_or(defaults.model),
                    transport.clone(),
                )
                .with_api_key(api_key)
            }
            _ => HttpGenerator::new(
                provider.clone(),
                ApiFormat::OllamaChat,
                config.ollama.base_url.as_deref().unwrap_or(OLLAMA_BASE_URL),
                config.ollama.model.as_deref().unwrap_or(OLLAMA_MODEL),
                transport.clone(),
            )
            .with_enabled(config.ollama.enabled),
        };

        debug!(
            "Registered {} ({}, ready: {})",
            provider,
            generator.model(),
            generator.is_ready()
        );
        registry = registry.register(Arc::new(generator));
    }

    Ok(registry)
}
