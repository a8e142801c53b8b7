//! Hand-written port doubles shared by the unit tests of this crate.

use crate::ports::cache_store::{CacheStoreError, DurableCacheStore};
use crate::ports::clock::Clock;
use crate::ports::generator::{Generator, GeneratorError};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use council_domain::{CacheEntry, CacheKey, Generation, ProviderId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Behavior {
    Reply(Generation),
    Fail(GeneratorError),
    Panic(&'static str),
}

/// Scripted generator recording every call it receives
pub struct MockGenerator {
    provider: ProviderId,
    ready: bool,
    behavior: Behavior,
    delay: Duration,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    pub max_tokens: Mutex<Vec<u32>>,
}

impl MockGenerator {
    pub fn replying(provider: ProviderId, text: &str) -> Self {
        Self::new(provider, Behavior::Reply(Generation::new(text, 10, 20)))
    }

    pub fn failing(provider: ProviderId, error: GeneratorError) -> Self {
        Self::new(provider, Behavior::Fail(error))
    }

    pub fn panicking(provider: ProviderId, message: &'static str) -> Self {
        Self::new(provider, Behavior::Panic(message))
    }

    pub fn new(provider: ProviderId, behavior: Behavior) -> Self {
        Self {
            provider,
            ready: true,
            behavior,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            max_tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn not_ready(mut self) -> Self {
        self.ready = false;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    fn provider(&self) -> &ProviderId {
        &self.provider
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn generate(
        &self,
        prompt: &str,
        _temperature: f64,
        max_tokens: u32,
    ) -> Result<Generation, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.max_tokens.lock().unwrap().push(max_tokens);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.behavior {
            Behavior::Reply(generation) => Ok(generation.clone()),
            Behavior::Fail(error) => Err(error.clone()),
            Behavior::Panic(message) => panic!("{}", message),
        }
    }
}

/// In-memory durable tier that can be switched into a failing state
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
    broken: AtomicBool,
    pub writes: AtomicUsize,
}

impl MemoryCacheStore {
    pub fn broken() -> Self {
        let store = Self::default();
        store.broken.store(true, Ordering::SeqCst);
        store
    }

    pub fn insert(&self, key: &CacheKey, entry: CacheEntry) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.as_str().to_string(), entry);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.lock().unwrap().contains_key(key.as_str())
    }
}

#[async_trait]
impl DurableCacheStore for MemoryCacheStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheStoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(CacheStoreError::Unavailable("store is down".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key.as_str()).cloned())
    }

    async fn put(&self, key: &CacheKey, entry: &CacheEntry) -> Result<(), CacheStoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(CacheStoreError::Unavailable("store is down".to_string()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.insert(key, entry.clone());
        Ok(())
    }
}

/// Clock that only moves when told to
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self(AtomicU64::new(start_ms))
    }

    pub fn advance(&self, by: Duration) {
        self.0.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress notifier recording the events it sees
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl ProgressNotifier for RecordingProgress {
    fn on_dispatch_start(&self, total: usize) {
        self.events.lock().unwrap().push(format!("start:{}", total));
    }

    fn on_provider_complete(&self, provider: &ProviderId, success: bool) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done:{}:{}", provider, success));
    }

    fn on_dispatch_complete(&self) {
        self.events.lock().unwrap().push("complete".to_string());
    }

    fn on_cache_hit(&self) {
        self.events.lock().unwrap().push("cache_hit".to_string());
    }
}
