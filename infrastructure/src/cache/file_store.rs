//! Filesystem-backed durable cache tier
//!
//! One JSON document per key, `{dir}/{key}.json`. Writes go to a temporary
//! file first and are renamed into place, so readers never observe a
//! partially written document.

use async_trait::async_trait;
use council_application::{CacheStoreError, DurableCacheStore};
use council_domain::{CacheEntry, CacheKey};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

pub struct FileCacheStore {
    dir: PathBuf,
    /// Distinguishes temporary files of concurrent writes
    write_seq: AtomicU64,
}

impl FileCacheStore {
    /// Use `dir` as the store, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheStoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        debug!("Durable cache directory: {}", dir.display());
        Ok(Self {
            dir,
            write_seq: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait]
impl DurableCacheStore for FileCacheStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheStoreError> {
        let bytes = match tokio::fs::read(self.document_path(key)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| CacheStoreError::Malformed(e.to_string()))
    }

    async fn put(&self, key: &CacheKey, entry: &CacheEntry) -> Result<(), CacheStoreError> {
        let bytes =
            serde_json::to_vec(entry).map_err(|e| CacheStoreError::Malformed(e.to_string()))?;

        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let temp_path = self
            .dir
            .join(format!(".{}.{}.{}.tmp", key.as_str(), std::process::id(), seq));

        tokio::fs::write(&temp_path, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, self.document_path(key)).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}
