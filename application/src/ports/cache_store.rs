//! Durable cache store port
//!
//! The optional second tier of the result cache: a document store keyed by
//! the cache key's hex digest.

use async_trait::async_trait;
use council_domain::{CacheEntry, CacheKey};
use thiserror::Error;

/// Errors from the durable tier
///
/// The result cache logs these and treats them as a miss (reads) or a
/// no-op (writes).
#[derive(Error, Debug)]
pub enum CacheStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed cache document: {0}")]
    Malformed(String),

    #[error("Cache store unavailable: {0}")]
    Unavailable(String),
}

/// Durable document store for cache entries
#[async_trait]
pub trait DurableCacheStore: Send + Sync {
    /// Short backend name, for logs and stats
    fn name(&self) -> &str;

    /// Fetch the entry stored under `key`, `Ok(None)` if there is none.
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheStoreError>;

    /// Insert or overwrite the entry stored under `key`.
    async fn put(&self, key: &CacheKey, entry: &CacheEntry) -> Result<(), CacheStoreError>;
}
