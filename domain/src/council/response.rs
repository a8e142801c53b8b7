//! Aggregate council response

use super::consensus::ConsensusScore;
use super::mode::ResponseMode;
use super::result::GenerationResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The unit of work product: what gets cached and returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilResponse {
    /// Rendered synthesis or debate document (absent in Detailed mode)
    #[serde(default)]
    pub synthesis: Option<String>,
    /// One entry per dispatched provider, keyed by provider id
    #[serde(default)]
    pub responses: BTreeMap<String, GenerationResult>,
    /// Present only when at least two providers produced usable text
    #[serde(default)]
    pub consensus_score: Option<ConsensusScore>,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_latency_ms: f64,
    /// Served from the result cache
    #[serde(default)]
    pub cached: bool,
    #[serde(default)]
    pub mode: ResponseMode,
    /// Short per-call identifier
    #[serde(default)]
    pub request_id: String,
}

impl CouncilResponse {
    /// Successful but empty-handed response explaining why nothing was dispatched.
    pub fn degenerate(
        mode: ResponseMode,
        request_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            synthesis: Some(message.into()),
            responses: BTreeMap::new(),
            consensus_score: None,
            total_cost: 0.0,
            total_latency_ms: 0.0,
            cached: false,
            mode,
            request_id: request_id.into(),
        }
    }

    /// Iterator over providers that produced usable text.
    pub fn successful_responses(&self) -> impl Iterator<Item = &GenerationResult> {
        self.responses.values().filter(|r| r.is_usable())
    }

    /// Iterator over providers that reported an error.
    pub fn failed_responses(&self) -> impl Iterator<Item = &GenerationResult> {
        self.responses.values().filter(|r| r.is_error())
    }

    /// Copy of this response with per-call metadata cleared, for comparing
    /// a cached answer with the one it was computed from.
    pub fn without_call_metadata(&self) -> Self {
        let mut copy = Self {
            cached: false,
            request_id: String::new(),
            ..self.clone()
        };
        for result in copy.responses.values_mut() {
            result.cached = false;
        }
        copy
    }

    /// Flags the response and every per-provider result as served from cache.
    pub fn mark_cached(&mut self) {
        self.cached = true;
        for result in self.responses.values_mut() {
            result.cached = true;
        }
    }
}
