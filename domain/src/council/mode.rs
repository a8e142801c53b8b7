//! Response mode value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Shape of the artifact produced for a council request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Unified synthesis with truncated excerpts (default)
    Synthesis,
    /// Verbatim per-provider responses, no synthesized document
    Detailed,
    /// Debate transcript with every provider's full answer
    Debate,
}

impl ResponseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Synthesis => "synthesis",
            ResponseMode::Detailed => "detailed",
            ResponseMode::Debate => "debate",
        }
    }

    /// Whether this mode renders a document and scores consensus
    pub fn renders_document(&self) -> bool {
        !matches!(self, ResponseMode::Detailed)
    }
}

impl Default for ResponseMode {
    fn default() -> Self {
        Self::Synthesis
    }
}

impl std::fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResponseMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "synthesis" => Ok(ResponseMode::Synthesis),
            "detailed" => Ok(ResponseMode::Detailed),
            "debate" => Ok(ResponseMode::Debate),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}
