//! Cache-aside store for council responses
//!
//! A local in-process tier, always active while caching is enabled, and an
//! optional durable tier behind [`DurableCacheStore`]. Expiry is lazy: an
//! entry is checked against the TTL when it is read and dropped from the
//! local tier by the read that finds it stale.

use crate::ports::cache_store::DurableCacheStore;
use crate::ports::clock::{Clock, SystemClock};
use council_domain::util::round_to;
use council_domain::{CacheEntry, CacheKey, CacheStats, CouncilResponse};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Default time-to-live for cached responses.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

pub struct ResultCache {
    enabled: bool,
    ttl: Duration,
    local: Mutex<HashMap<CacheKey, CacheEntry>>,
    durable: Option<Arc<dyn DurableCacheStore>>,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    /// Detached durable writes
    pending_writes: TaskTracker,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            enabled: true,
            ttl,
            local: Mutex::new(HashMap::new()),
            durable: None,
            clock: Arc::new(SystemClock),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            pending_writes: TaskTracker::new(),
        }
    }

    /// A cache that never stores nor returns anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(DEFAULT_TTL)
        }
    }

    pub fn with_durable(mut self, store: Arc<dyn DurableCacheStore>) -> Self {
        self.durable = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look `key` up in the local tier, then the durable one.
    ///
    /// Exactly one of the hit or miss counters moves per call. Durable
    /// faults are logged and read as a miss.
    pub async fn get(&self, key: &CacheKey) -> Option<CouncilResponse> {
        if !self.enabled {
            return None;
        }
        let now = self.clock.now_ms();

        {
            let mut local = self.local.lock().await;
            let expired = match local.get(key) {
                Some(entry) if !entry.is_expired(now, self.ttl) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(key = key.short(), source = "memory", "Cache hit");
                    return Some(entry.response.clone());
                }
                Some(_) => true,
                None => false,
            };
            if expired {
                local.remove(key);
                debug!(key = key.short(), "Cache entry expired");
            }
        }

        if let Some(store) = &self.durable {
            match store.get(key).await {
                Ok(Some(entry)) if !entry.is_expired(now, self.ttl) => {
                    let response = entry.response.clone();
                    self.local.lock().await.insert(key.clone(), entry);
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!(key = key.short(), source = store.name(), "Cache hit");
                    return Some(response);
                }
                Ok(Some(_)) => {
                    debug!(key = key.short(), source = store.name(), "Cache entry expired");
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(key = key.short(), store = store.name(), "Durable cache read failed: {}", e);
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = key.short(), "Cache miss");
        None
    }

    /// Store `response` in the local tier and schedule the durable write.
    ///
    /// The durable write runs detached; its failure is only logged.
    pub async fn set(&self, key: &CacheKey, question: &str, response: &CouncilResponse) {
        if !self.enabled {
            return;
        }

        let entry = CacheEntry::new(response.clone(), self.clock.now_ms(), question);
        self.local.lock().await.insert(key.clone(), entry.clone());
        debug!(key = key.short(), "Cache set (memory)");

        if let Some(store) = &self.durable {
            let store = Arc::clone(store);
            let key = key.clone();
            self.pending_writes.spawn(async move {
                match store.put(&key, &entry).await {
                    Ok(()) => debug!(key = key.short(), store = store.name(), "Cache set (durable)"),
                    Err(e) => warn!(
                        key = key.short(),
                        store = store.name(),
                        "Durable cache write failed: {}",
                        e
                    ),
                }
            });
        }
    }

    /// Wait for every detached durable write scheduled so far.
    pub async fn flush(&self) {
        self.pending_writes.close();
        self.pending_writes.wait().await;
        self.pending_writes.reopen();
    }

    /// Empty the local tier and reset the counters.
    pub async fn clear(&self) {
        self.local.lock().await.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        info!("Local result cache cleared");
    }

    pub async fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            round_to(hits as f64 / total as f64 * 100.0, 2)
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            memory_entries: self.local.lock().await.len(),
            durable_available: self.durable.is_some(),
            enabled: self.enabled,
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
