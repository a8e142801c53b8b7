//! Per-provider generation results.
//!
//! - [`Generation`] - raw output returned by a provider adapter
//! - [`GenerationResult`] - the council's record of one provider's outcome,
//!   including failures (errors are data here, never escaping the fan-out)

use crate::core::provider::ProviderId;
use serde::{Deserialize, Serialize};

/// Raw text and token usage returned by a generator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl Generation {
    pub fn new(text: impl Into<String>, input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            text: text.into(),
            input_tokens,
            output_tokens,
        }
    }
}

/// Outcome of dispatching the question to a single provider
///
/// Exactly one `GenerationResult` exists per dispatched provider, failed
/// ones included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// The provider that produced this result
    pub provider: ProviderId,
    /// Generated text (empty on failure)
    pub content: String,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    /// Wall-clock time of the provider call
    #[serde(default)]
    pub latency_ms: f64,
    /// Monetary cost in USD
    #[serde(default)]
    pub cost: f64,
    /// Error message if the provider failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set on every result of a response served from the cache
    #[serde(default)]
    pub cached: bool,
}

impl GenerationResult {
    /// Creates a successful result from a provider's generation.
    pub fn success(provider: ProviderId, generation: Generation, latency_ms: f64, cost: f64) -> Self {
        Self {
            provider,
            content: generation.text,
            input_tokens: generation.input_tokens,
            output_tokens: generation.output_tokens,
            latency_ms,
            cost,
            error: None,
            cached: false,
        }
    }

    /// Creates a failed result carrying the reason and no content.
    pub fn failure(provider: ProviderId, error: impl Into<String>, latency_ms: f64) -> Self {
        Self {
            provider,
            content: String::new(),
            input_tokens: 0,
            output_tokens: 0,
            latency_ms,
            cost: 0.0,
            error: Some(error.into()),
            cached: false,
        }
    }

    /// Returns `true` if the provider returned an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Usable text: non-empty content and no error.
    pub fn is_usable(&self) -> bool {
        !self.content.is_empty() && self.error.is_none()
    }
}
