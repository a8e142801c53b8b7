//! Council configuration from TOML (`[council]` section)

use council_application::CouncilSettings;
use council_application::config::council_settings::DEFAULT_MAX_TOKENS;
use council_domain::{DEFAULT_TEMPERATURE, ProviderId};
use serde::{Deserialize, Serialize};

/// Raw council defaults from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Providers consulted when a request names none
    pub default_providers: Vec<String>,
    /// Output token cap when a request carries none
    pub max_tokens: u32,
    /// Temperature when a request carries none
    pub temperature: f64,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            default_providers: ProviderId::default_providers()
                .iter()
                .map(|p| p.to_string())
                .collect(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl FileCouncilConfig {
    pub fn parse_default_providers(&self) -> Vec<ProviderId> {
        self.default_providers
            .iter()
            .map(|name| ProviderId::from(name.as_str()))
            .collect()
    }

    pub fn to_settings(&self) -> CouncilSettings {
        CouncilSettings::default()
            .with_default_max_tokens(self.max_tokens)
            .with_default_temperature(self.temperature)
            .with_default_providers(self.parse_default_providers())
    }
}
