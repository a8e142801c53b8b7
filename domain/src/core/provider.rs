//! Provider identifier value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text-generation providers that can sit on the council (Value Object)
///
/// Parsing never fails: anything that is not a known provider becomes
/// [`ProviderId::Custom`], and is later dropped by the orchestrator
/// because no generator is registered for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    Claude,
    Gpt4,
    Gemini,
    Mistral,
    Cohere,
    DeepSeek,
    Ollama,
    Custom(String),
}

impl ProviderId {
    /// Every built-in provider, in display order.
    pub const BUILTIN: [ProviderId; 7] = [
        ProviderId::Claude,
        ProviderId::Gpt4,
        ProviderId::Gemini,
        ProviderId::Mistral,
        ProviderId::Cohere,
        ProviderId::DeepSeek,
        ProviderId::Ollama,
    ];

    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &str {
        match self {
            ProviderId::Claude => "claude",
            ProviderId::Gpt4 => "gpt4",
            ProviderId::Gemini => "gemini",
            ProviderId::Mistral => "mistral",
            ProviderId::Cohere => "cohere",
            ProviderId::DeepSeek => "deepseek",
            ProviderId::Ollama => "ollama",
            ProviderId::Custom(s) => s,
        }
    }

    /// Get the default council members
    pub fn default_providers() -> Vec<ProviderId> {
        vec![ProviderId::Claude, ProviderId::Gpt4, ProviderId::Gemini]
    }

    /// Check if this provider runs locally (no API cost)
    pub fn is_local(&self) -> bool {
        matches!(self, ProviderId::Ollama)
    }

    /// Check if this is one of the built-in providers
    pub fn is_builtin(&self) -> bool {
        !matches!(self, ProviderId::Custom(_))
    }

    /// "local" or "cloud", as shown in provider listings
    pub fn kind_label(&self) -> &'static str {
        if self.is_local() { "local" } else { "cloud" }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(match normalized.as_str() {
            "claude" => ProviderId::Claude,
            "gpt4" => ProviderId::Gpt4,
            "gemini" => ProviderId::Gemini,
            "mistral" => ProviderId::Mistral,
            "cohere" => ProviderId::Cohere,
            "deepseek" => ProviderId::DeepSeek,
            "ollama" => ProviderId::Ollama,
            _ => ProviderId::Custom(normalized),
        })
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ProviderId::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in ProviderId::BUILTIN {
            let s = provider.to_string();
            let parsed: ProviderId = s.parse().unwrap();
            assert_eq!(provider, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ProviderId::from(" Claude "), ProviderId::Claude);
        assert_eq!(ProviderId::from("DEEPSEEK"), ProviderId::DeepSeek);
    }

    #[test]
    fn test_custom_provider() {
        let provider = ProviderId::from("grok");
        assert_eq!(provider, ProviderId::Custom("grok".to_string()));
        assert_eq!(provider.to_string(), "grok");
        assert!(!provider.is_builtin());
    }

    #[test]
    fn test_custom_provider_is_case_insensitive() {
        let upper = ProviderId::from(" Grok ");
        let lower = ProviderId::from("grok");
        assert_eq!(upper, lower);
        assert_eq!(upper.as_str(), "grok");
    }

    #[test]
    fn test_local_detection() {
        assert!(ProviderId::Ollama.is_local());
        assert!(!ProviderId::Claude.is_local());
        assert_eq!(ProviderId::Ollama.kind_label(), "local");
        assert_eq!(ProviderId::Gemini.kind_label(), "cloud");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            ProviderId::default_providers(),
            vec![ProviderId::Claude, ProviderId::Gpt4, ProviderId::Gemini]
        );
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&ProviderId::Gpt4).unwrap();
        assert_eq!(json, "\"gpt4\"");
        let parsed: ProviderId = serde_json::from_str("\"mistral\"").unwrap();
        assert_eq!(parsed, ProviderId::Mistral);
    }
}
