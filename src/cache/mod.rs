//! Two-tier response cache.
//!
//! Reads go volatile tier first, then durable tier; a durable hit is promoted
//! into the volatile tier before it is returned. Writes go to both tiers.
//!
//! Backend failures never reach the caller. They are logged at `warn` and the
//! operation degrades to a miss (reads) or a no-op (writes), so a cache outage
//! costs hit rate, never a failed lookup.

mod durable;
mod keys;
mod memory;
mod tier;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error_handling::DatabaseError;
use crate::storage::{init_db_pool_with_path, run_migrations};

pub use durable::SqliteTier;
pub use keys::{geocode_final_key, raw_response_key, reverse_final_key};
pub use memory::MemoryTier;
pub use tier::{CacheTier, Namespace};

/// Layered cache shared by every adapter and orchestrator in the process.
pub struct CacheStore {
    volatile: Arc<dyn CacheTier>,
    durable: Arc<dyn CacheTier>,
}

impl CacheStore {
    /// Builds a store from two arbitrary tiers.
    pub fn new(volatile: Arc<dyn CacheTier>, durable: Arc<dyn CacheTier>) -> Self {
        Self { volatile, durable }
    }

    /// Opens the SQLite database at `db_path` (creating and migrating it if
    /// needed) and pairs it with an in-memory tier.
    pub async fn open(
        db_path: &Path,
        memory_capacity: u64,
        memory_ttl: Duration,
    ) -> Result<Self, DatabaseError> {
        let pool = init_db_pool_with_path(db_path).await?;
        run_migrations(&pool).await?;
        Ok(Self::new(
            Arc::new(MemoryTier::new(memory_capacity, memory_ttl)),
            Arc::new(SqliteTier::new(pool)),
        ))
    }

    /// Looks `key` up in both tiers.
    pub async fn get(&self, namespace: Namespace, key: &str) -> Option<String> {
        match self.volatile.get(namespace, key).await {
            Ok(Some(value)) => {
                debug!("{} cache hit ({}): {}", namespace.as_str(), self.volatile.name(), key);
                return Some(value);
            }
            Ok(None) => {}
            Err(e) => warn!("{} tier read failed for {}: {}", self.volatile.name(), key, e),
        }

        let value = match self.durable.get(namespace, key).await {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                warn!("{} tier read failed for {}: {}", self.durable.name(), key, e);
                return None;
            }
        };

        debug!("{} cache hit ({}): {}", namespace.as_str(), self.durable.name(), key);
        if let Err(e) = self.volatile.set(namespace, key, &value).await {
            warn!("{} tier promotion failed for {}: {}", self.volatile.name(), key, e);
        }
        Some(value)
    }

    /// Writes `value` to both tiers.
    pub async fn set(&self, namespace: Namespace, key: &str, value: &str) {
        if let Err(e) = self.volatile.set(namespace, key, value).await {
            warn!("{} tier write failed for {}: {}", self.volatile.name(), key, e);
        }
        if let Err(e) = self.durable.set(namespace, key, value).await {
            warn!("{} tier write failed for {}: {}", self.durable.name(), key, e);
        }
    }

    /// Reads and deserializes a JSON value. An undecodable entry counts as a miss.
    pub async fn get_json<T: DeserializeOwned>(&self, namespace: Namespace, key: &str) -> Option<T> {
        let raw = self.get(namespace, key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Serializes `value` as JSON and writes it to both tiers.
    pub async fn set_json<T: Serialize + ?Sized>(&self, namespace: Namespace, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(serialized) => self.set(namespace, key, &serialized).await,
            Err(e) => warn!("Failed to serialize cache entry {}: {}", key, e),
        }
    }

    /// Releases both tiers.
    pub async fn close(&self) {
        self.volatile.close().await;
        self.durable.close().await;
    }
}
