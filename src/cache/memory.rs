//! Volatile tier backed by `moka::future::Cache`.
//!
//! Entries expire after a fixed time-to-live and the cache is bounded by entry
//! count, evicting least recently used entries beyond that.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use super::tier::{CacheTier, Namespace};
use crate::error_handling::CacheError;

/// In-process tier-1 cache.
pub struct MemoryTier {
    cache: MokaCache<(Namespace, String), String>,
}

impl MemoryTier {
    /// Creates a tier holding at most `capacity` entries, each living for `ttl`.
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }
}

#[async_trait]
impl CacheTier for MemoryTier {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, namespace: Namespace, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.cache.get(&(namespace, key.to_string())).await)
    }

    async fn set(&self, namespace: Namespace, key: &str, value: &str) -> Result<(), CacheError> {
        self.cache
            .insert((namespace, key.to_string()), value.to_string())
            .await;
        Ok(())
    }

    async fn close(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}
