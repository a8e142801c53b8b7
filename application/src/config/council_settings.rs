//! Council settings: defaults for requests that leave a value unset.

use council_domain::{DEFAULT_TEMPERATURE, ProviderId};
use serde::{Deserialize, Serialize};

/// Default output token cap when a request carries none.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Request defaults applied by the orchestrator and the entry points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilSettings {
    /// Used when a request has no `max_tokens`
    pub default_max_tokens: u32,
    /// Used by entry points when the caller gives no temperature
    pub default_temperature: f64,
    /// Used by entry points when the caller names no provider
    pub default_providers: Vec<ProviderId>,
}

impl Default for CouncilSettings {
    fn default() -> Self {
        Self {
            default_max_tokens: DEFAULT_MAX_TOKENS,
            default_temperature: DEFAULT_TEMPERATURE,
            default_providers: ProviderId::default_providers(),
        }
    }
}

impl CouncilSettings {
    // ==================== Builder Methods ====================

    pub fn with_default_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }

    pub fn with_default_temperature(mut self, temperature: f64) -> Self {
        self.default_temperature = temperature;
        self
    }

    pub fn with_default_providers(mut self, providers: Vec<ProviderId>) -> Self {
        self.default_providers = providers;
        self
    }
}
