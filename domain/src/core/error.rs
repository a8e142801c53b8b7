//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are raised only by boundary validation. Once a request has been
/// validated, orchestration never produces a `DomainError`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f64),

    #[error("max_tokens must be between 1 and {max}, got {value}")]
    InvalidMaxTokens { value: u32, max: u32 },

    #[error("At least one provider must be requested")]
    NoProviders,

    #[error("Unknown response mode: {0}")]
    UnknownMode(String),
}

impl DomainError {
    /// Field of the request the error refers to, for API error payloads.
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::InvalidQuestion(_) => "question",
            DomainError::InvalidTemperature(_) => "temperature",
            DomainError::InvalidMaxTokens { .. } => "max_tokens",
            DomainError::NoProviders => "providers",
            DomainError::UnknownMode(_) => "mode",
        }
    }
}
