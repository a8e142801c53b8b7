//! Per-provider token prices

use crate::core::provider::ProviderId;

/// USD per 1000 input and output tokens for one provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

impl Price {
    pub const FREE: Price = Price {
        input_per_1k: 0.0,
        output_per_1k: 0.0,
    };

    const fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }

    /// Price table lookup; unknown providers are free.
    pub fn for_provider(provider: &ProviderId) -> Self {
        match provider {
            ProviderId::Claude => Price::new(0.003, 0.015),
            ProviderId::Gpt4 => Price::new(0.01, 0.03),
            ProviderId::Gemini => Price::new(0.000_25, 0.000_5),
            ProviderId::Mistral => Price::new(0.002, 0.006),
            ProviderId::Cohere => Price::new(0.000_5, 0.001_5),
            ProviderId::DeepSeek => Price::new(0.001_4, 0.002_8),
            ProviderId::Ollama | ProviderId::Custom(_) => Price::FREE,
        }
    }

    pub fn cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        input_tokens as f64 / 1000.0 * self.input_per_1k
            + output_tokens as f64 / 1000.0 * self.output_per_1k
    }
}

/// Cost of one call to `provider`.
pub fn cost_for(provider: &ProviderId, input_tokens: u64, output_tokens: u64) -> f64 {
    Price::for_provider(provider).cost(input_tokens, output_tokens)
}
