//! Process-lifetime usage counters

use council_domain::util::round_to;
use council_domain::{CacheStats, CouncilResponse, CouncilStats};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Totals {
    requests: u64,
    cached_responses: u64,
    cost: f64,
    latency_ms: f64,
    by_provider: BTreeMap<String, u64>,
    by_mode: BTreeMap<String, u64>,
}

/// Running statistics owned by the orchestrator
///
/// Updated only once a request has fully completed.
#[derive(Debug, Default)]
pub struct RunningStats {
    totals: Mutex<Totals>,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a dispatched request and every provider it reached.
    pub async fn record_completed(&self, response: &CouncilResponse) {
        let mut totals = self.totals.lock().await;
        totals.requests += 1;
        totals.cost += response.total_cost;
        totals.latency_ms += response.total_latency_ms;
        for provider in response.responses.keys() {
            *totals.by_provider.entry(provider.clone()).or_default() += 1;
        }
        *totals
            .by_mode
            .entry(response.mode.as_str().to_string())
            .or_default() += 1;
    }

    /// Account for a response served from the cache. Per-provider and
    /// per-mode counts are left untouched.
    pub async fn record_cache_hit(&self) {
        self.totals.lock().await.cached_responses += 1;
    }

    pub async fn snapshot(&self, cache: CacheStats) -> CouncilStats {
        let totals = self.totals.lock().await;
        let avg_latency_ms = if totals.requests == 0 {
            0.0
        } else {
            totals.latency_ms / totals.requests as f64
        };

        CouncilStats {
            total_requests: totals.requests,
            cached_responses: totals.cached_responses,
            total_cost: round_to(totals.cost, 4),
            avg_latency_ms: round_to(avg_latency_ms, 2),
            requests_by_provider: totals.by_provider.clone(),
            requests_by_mode: totals.by_mode.clone(),
            cache,
        }
    }
}
