//! Provider configuration from TOML (`[providers]` section)
//!
//! Every field of a provider table is optional; unset values fall back to
//! the built-in endpoint defaults of that provider.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-provider overrides for a hosted API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl FileProviderConfig {
    /// API key from the config file, else from the environment.
    ///
    /// Empty values count as unset.
    pub fn resolve_api_key(&self, default_env: &str) -> Option<String> {
        if let Some(key) = &self.api_key
            && !key.trim().is_empty()
        {
            return Some(key.clone());
        }
        let env_name = self.api_key_env.as_deref().unwrap_or(default_env);
        std::env::var(env_name)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Local Ollama runtime settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Ollama is only consulted when explicitly enabled
    pub enabled: bool,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Per-call timeout enforced by every HTTP generator
    pub request_timeout_secs: u64,
    pub claude: FileProviderConfig,
    pub gpt4: FileProviderConfig,
    pub gemini: FileProviderConfig,
    pub mistral: FileProviderConfig,
    pub cohere: FileProviderConfig,
    pub deepseek: FileProviderConfig,
    pub ollama: FileOllamaConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            claude: FileProviderConfig::default(),
            gpt4: FileProviderConfig::default(),
            gemini: FileProviderConfig::default(),
            mistral: FileProviderConfig::default(),
            cohere: FileProviderConfig::default(),
            deepseek: FileProviderConfig::default(),
            ollama: FileOllamaConfig::default(),
        }
    }
}

impl FileProvidersConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Copy with every inline API key masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for provider in [
            &mut copy.claude,
            &mut copy.gpt4,
            &mut copy.gemini,
            &mut copy.mistral,
            &mut copy.cohere,
            &mut copy.deepseek,
        ] {
            if provider.api_key.is_some() {
                provider.api_key = Some(REDACTED.to_string());
            }
        }
        copy
    }
}

const REDACTED: &str = "********";
