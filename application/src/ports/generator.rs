//! Generator port
//!
//! Defines the interface for calling a single text-generation provider.

use async_trait::async_trait;
use council_domain::{Generation, ProviderId};
use thiserror::Error;

/// Errors that can occur while calling a provider
///
/// These never escape the council fan-out: the orchestrator records them
/// as the provider's error string.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("{0}")]
    Other(String),
}

/// A text-generation provider
///
/// One implementation per provider; adapters live in the infrastructure
/// layer. Implementations enforce their own timeout and report it as
/// [`GeneratorError::Timeout`].
#[async_trait]
pub trait Generator: Send + Sync {
    /// The provider this generator talks to
    fn provider(&self) -> &ProviderId;

    /// Configuration check only (API key present, local runtime enabled). No I/O.
    fn is_ready(&self) -> bool;

    /// Generate a completion for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Generation, GeneratorError>;
}
