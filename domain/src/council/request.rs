//! Council request value object

use super::mode::ResponseMode;
use crate::core::error::DomainError;
use crate::core::provider::ProviderId;
use crate::core::question::Question;
use serde::Serialize;

/// Upper bound accepted for `max_tokens` at the boundary.
pub const MAX_OUTPUT_TOKENS: u32 = 16_000;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// A request to the council
///
/// Built by the boundary (CLI flags, HTTP body, MCP arguments), which owns
/// the defaults, then validated once with [`CouncilRequest::validate`];
/// orchestration assumes an already valid value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouncilRequest {
    /// The question to fan out
    pub question: Question,
    /// Output shape
    pub mode: ResponseMode,
    /// Providers to consult, in order of preference
    pub providers: Vec<ProviderId>,
    /// Wrap the question in each provider's prompt template
    pub optimize_prompts: bool,
    /// Sampling temperature (0.0..=2.0)
    pub temperature: f64,
    /// Output token cap; falls back to the server default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Streaming flag (accepted, responses are always returned whole)
    pub stream: bool,
    /// Caller identifier, for tracking only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CouncilRequest {
    pub fn new(question: impl Into<Question>) -> Self {
        Self {
            question: question.into(),
            mode: ResponseMode::default(),
            providers: ProviderId::default_providers(),
            optimize_prompts: true,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            stream: false,
            user_id: None,
        }
    }

    pub fn with_mode(mut self, mode: ResponseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_providers(mut self, providers: Vec<ProviderId>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn without_optimization(mut self) -> Self {
        self.optimize_prompts = false;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Requested providers with duplicates removed, first occurrence kept.
    pub fn requested_providers(&self) -> Vec<ProviderId> {
        let mut seen = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            if !seen.contains(provider) {
                seen.push(provider.clone());
            }
        }
        seen
    }

    /// Boundary validation: lengths, numeric ranges, non-empty provider list.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.question.validate()?;

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(DomainError::InvalidTemperature(self.temperature));
        }

        if let Some(max_tokens) = self.max_tokens
            && !(1..=MAX_OUTPUT_TOKENS).contains(&max_tokens)
        {
            return Err(DomainError::InvalidMaxTokens {
                value: max_tokens,
                max: MAX_OUTPUT_TOKENS,
            });
        }

        if self.providers.is_empty() {
            return Err(DomainError::NoProviders);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = CouncilRequest::new("What causes rain?");
        assert_eq!(request.mode, ResponseMode::Synthesis);
        assert_eq!(request.providers, ProviderId::default_providers());
        assert!(request.optimize_prompts);
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert!(request.max_tokens.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let request = CouncilRequest::new("q")
            .with_mode(ResponseMode::Debate)
            .with_providers(vec![ProviderId::Mistral])
            .with_temperature(1.2)
            .with_max_tokens(500)
            .without_optimization()
            .with_user_id("alice");

        assert_eq!(request.mode, ResponseMode::Debate);
        assert_eq!(request.providers, vec![ProviderId::Mistral]);
        assert_eq!(request.temperature, 1.2);
        assert_eq!(request.max_tokens, Some(500));
        assert!(!request.optimize_prompts);
        assert_eq!(request.user_id.as_deref(), Some("alice"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let hot = CouncilRequest::new("q").with_temperature(2.5);
        assert_eq!(hot.validate(), Err(DomainError::InvalidTemperature(2.5)));

        let zero = CouncilRequest::new("q").with_max_tokens(0);
        assert!(matches!(
            zero.validate(),
            Err(DomainError::InvalidMaxTokens { value: 0, .. })
        ));

        let huge = CouncilRequest::new("q").with_max_tokens(MAX_OUTPUT_TOKENS + 1);
        assert!(huge.validate().is_err());

        let empty = CouncilRequest::new("   ");
        assert!(matches!(
            empty.validate(),
            Err(DomainError::InvalidQuestion(_))
        ));

        let nobody = CouncilRequest::new("q").with_providers(vec![]);
        assert_eq!(nobody.validate(), Err(DomainError::NoProviders));
    }

    #[test]
    fn test_requested_providers_dedup() {
        let request = CouncilRequest::new("q").with_providers(vec![
            ProviderId::Gpt4,
            ProviderId::Claude,
            ProviderId::Gpt4,
        ]);
        assert_eq!(
            request.requested_providers(),
            vec![ProviderId::Gpt4, ProviderId::Claude]
        );
    }

    #[test]
    fn test_serialize_omits_unset_options() {
        let request = CouncilRequest::new("q").with_providers(vec![ProviderId::from("Grok")]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["question"], "q");
        assert_eq!(json["mode"], "synthesis");
        assert_eq!(json["providers"], serde_json::json!(["grok"]));
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("user_id").is_none());
    }
}
