//! Cache tier abstraction.
//!
//! A tier is a plain string key/value store scoped by [`Namespace`]. The
//! [`CacheStore`](super::CacheStore) layers two tiers and owns the failure
//! policy; tiers themselves just report errors.

use async_trait::async_trait;

use crate::error_handling::CacheError;

/// Disjoint key spaces held by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Per-provider payloads, keyed `raw:<provider>:<hash>`.
    Raw,
    /// Orchestrator results after failover, keyed `final:<operation>:<hash>`.
    Final,
}

impl Namespace {
    /// Short name used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Raw => "raw",
            Namespace::Final => "final",
        }
    }
}

/// A single storage layer of the cache.
#[async_trait]
pub trait CacheTier: Send + Sync {
    /// Tier name for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns the stored value, or `None` on a miss.
    async fn get(&self, namespace: Namespace, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, namespace: Namespace, key: &str, value: &str) -> Result<(), CacheError>;

    /// Releases backend resources. Tiers without any hold nothing to release.
    async fn close(&self) {}
}
