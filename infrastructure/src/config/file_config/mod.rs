//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types
//! where needed.

mod cache;
mod council;
mod logging;
mod providers;
mod server;

pub use cache::FileCacheConfig;
pub use council::FileCouncilConfig;
pub use logging::FileLoggingConfig;
pub use providers::{FileOllamaConfig, FileProviderConfig, FileProvidersConfig};
pub use server::FileServerConfig;

use council_domain::{MAX_OUTPUT_TOKENS, ProviderId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("providers.request_timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("cache.ttl_seconds cannot be 0")]
    InvalidTtl,

    #[error("server.rate_limit_per_minute cannot be 0")]
    InvalidRateLimit,

    #[error("council.temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f64),

    #[error("council.max_tokens must be between 1 and 16000, got {0}")]
    InvalidMaxTokens(u32),

    #[error("council.default_providers: unknown provider '{0}'")]
    UnknownProvider(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Request defaults
    pub council: FileCouncilConfig,
    /// Result cache settings
    pub cache: FileCacheConfig,
    /// HTTP API settings
    pub server: FileServerConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
    /// Provider credentials and endpoints
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.providers.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.cache.ttl_seconds == 0 {
            return Err(ConfigValidationError::InvalidTtl);
        }
        if self.server.rate_limit_per_minute == 0 {
            return Err(ConfigValidationError::InvalidRateLimit);
        }
        if !(0.0..=2.0).contains(&self.council.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.council.temperature,
            ));
        }
        if !(1..=MAX_OUTPUT_TOKENS).contains(&self.council.max_tokens) {
            return Err(ConfigValidationError::InvalidMaxTokens(
                self.council.max_tokens,
            ));
        }
        if let Some(unknown) = self
            .council
            .parse_default_providers()
            .into_iter()
            .find(|p| !p.is_builtin())
        {
            return Err(ConfigValidationError::UnknownProvider(unknown.to_string()));
        }
        Ok(())
    }

    /// Built-in providers listed as council defaults.
    pub fn default_providers(&self) -> Vec<ProviderId> {
        self.council.parse_default_providers()
    }
}
