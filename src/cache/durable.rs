//! Durable tier backed by SQLite.
//!
//! No expiry: this tier is the system of record. Access is guarded by a
//! [`DurableCircuitBreaker`] so a failing database is skipped instead of being
//! hit on every request.

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::tier::{CacheTier, Namespace};
use crate::error_handling::CacheError;
use crate::storage::{fetch_response, upsert_response, DurableCircuitBreaker};

/// Tier-2 cache stored in the `raw_responses` / `final_responses` tables.
pub struct SqliteTier {
    pool: SqlitePool,
    breaker: DurableCircuitBreaker,
}

impl SqliteTier {
    /// Wraps an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_breaker(pool, DurableCircuitBreaker::new())
    }

    /// Wraps a pool with a custom breaker.
    pub fn with_breaker(pool: SqlitePool, breaker: DurableCircuitBreaker) -> Self {
        Self { pool, breaker }
    }

    async fn guard<T>(&self, result: Result<T, sqlx::Error>) -> Result<T, CacheError> {
        match result {
            Ok(value) => {
                self.breaker.record_success().await;
                Ok(value)
            }
            Err(e) => {
                self.breaker.record_failure().await;
                Err(CacheError::Sql(e))
            }
        }
    }
}

#[async_trait]
impl CacheTier for SqliteTier {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn get(&self, namespace: Namespace, key: &str) -> Result<Option<String>, CacheError> {
        if self.breaker.is_circuit_open().await {
            return Err(CacheError::CircuitOpen);
        }
        let result = fetch_response(&self.pool, namespace, key).await;
        self.guard(result).await
    }

    async fn set(&self, namespace: Namespace, key: &str, value: &str) -> Result<(), CacheError> {
        if self.breaker.is_circuit_open().await {
            return Err(CacheError::CircuitOpen);
        }
        let result = upsert_response(&self.pool, namespace, key, value).await;
        self.guard(result).await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
