//! Usage statistics snapshots

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result cache counters at a point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Hit rate in percent, two decimals
    pub hit_rate: f64,
    pub memory_entries: usize,
    pub durable_available: bool,
    pub enabled: bool,
}

/// Process-lifetime council statistics at a point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouncilStats {
    /// Requests answered by dispatching to providers
    pub total_requests: u64,
    /// Requests answered from the result cache
    #[serde(default)]
    pub cached_responses: u64,
    /// USD, four decimals
    pub total_cost: f64,
    /// Mean latency of completed requests, two decimals
    pub avg_latency_ms: f64,
    pub requests_by_provider: BTreeMap<String, u64>,
    pub requests_by_mode: BTreeMap<String, u64>,
    pub cache: CacheStats,
}
