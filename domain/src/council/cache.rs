//! Cache key and cache entry value objects

use super::mode::ResponseMode;
use super::response::CouncilResponse;
use crate::core::provider::ProviderId;
use crate::core::question::Question;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::Duration;

/// Content-addressed fingerprint of a council request
///
/// Derived from the normalized question, the sorted provider set and the
/// mode. Provider order, duplicates, surrounding whitespace and question
/// casing do not change the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

#[derive(Serialize)]
struct Fingerprint<'a> {
    mode: &'a str,
    providers: Vec<&'a str>,
    question: String,
}

impl CacheKey {
    pub fn derive(question: &Question, providers: &[ProviderId], mode: ResponseMode) -> Self {
        let mut ids: Vec<&str> = providers.iter().map(|p| p.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();

        let fingerprint = Fingerprint {
            mode: mode.as_str(),
            providers: ids,
            question: question.normalized(),
        };
        // Serializing a struct of strings cannot fail
        let canonical = serde_json::to_string(&fingerprint).unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 characters, for log lines
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cached response with its creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub response: CouncilResponse,
    /// Milliseconds since the Unix epoch
    pub created_at_ms: u64,
    /// Original question text, kept for inspection of the durable store
    #[serde(default)]
    pub question: String,
}

impl CacheEntry {
    pub fn new(response: CouncilResponse, created_at_ms: u64, question: impl Into<String>) -> Self {
        Self {
            response,
            created_at_ms,
            question: question.into(),
        }
    }

    /// Valid iff `now - created_at < ttl`.
    pub fn is_expired(&self, now_ms: u64, ttl: Duration) -> bool {
        let age = now_ms.saturating_sub(self.created_at_ms);
        u128::from(age) >= ttl.as_millis()
    }
}
