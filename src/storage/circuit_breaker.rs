//! Circuit breaker for the durable cache tier.
//!
//! When SQLite operations fail repeatedly (locked file, full disk, corrupted
//! database), every cache read and write would otherwise pay for another failing
//! round trip. After N consecutive failures the circuit opens and the durable
//! tier is bypassed until a cooldown period expires.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::config::{DURABLE_COOLDOWN, DURABLE_FAILURE_THRESHOLD};

/// Circuit breaker state for durable-tier operations.
///
/// Tracks consecutive failures and opens the circuit after a threshold.
/// The circuit automatically attempts to close after a cooldown period.
pub struct DurableCircuitBreaker {
    /// Number of consecutive failures before opening circuit
    failure_threshold: u32,
    /// Cooldown period before attempting to close circuit again
    cooldown_duration: Duration,
    /// Current consecutive failure count
    failure_count: AtomicU32,
    /// Whether the circuit is currently open
    is_open: AtomicBool,
    /// Timestamp when circuit was opened (for cooldown)
    opened_at: RwLock<Option<Instant>>,
}

impl DurableCircuitBreaker {
    /// Creates a new circuit breaker with the default threshold and cooldown.
    pub fn new() -> Self {
        Self::with_threshold(DURABLE_FAILURE_THRESHOLD, DURABLE_COOLDOWN)
    }

    /// Creates a new circuit breaker with custom settings.
    pub fn with_threshold(failure_threshold: u32, cooldown_duration: Duration) -> Self {
        DurableCircuitBreaker {
            failure_threshold,
            cooldown_duration,
            failure_count: AtomicU32::new(0),
            is_open: AtomicBool::new(false),
            opened_at: RwLock::new(None),
        }
    }

    /// Records a successful operation.
    ///
    /// Resets the failure count and closes the circuit if it was open.
    pub async fn record_success(&self) {
        self.failure_count.store(0, Ordering::SeqCst);
        if self.is_open.swap(false, Ordering::SeqCst) {
            *self.opened_at.write().await = None;
            log::info!("Durable cache circuit breaker: circuit closed after successful operation");
        }
    }

    /// Records a failed operation.
    ///
    /// Increments the failure count and opens the circuit if threshold is reached.
    pub async fn record_failure(&self) {
        let count = self.failure_count.fetch_add(1, Ordering::SeqCst) + 1;

        if count >= self.failure_threshold && !self.is_open.load(Ordering::SeqCst) {
            self.is_open.store(true, Ordering::SeqCst);
            *self.opened_at.write().await = Some(Instant::now());
            log::error!(
                "Durable cache circuit breaker: circuit opened after {} consecutive failures (cooldown: {}s)",
                count,
                self.cooldown_duration.as_secs()
            );
        }
    }

    /// Checks if the circuit is open (durable-tier operations should be skipped).
    ///
    /// Returns `false` once the cooldown has expired, allowing a trial operation.
    pub async fn is_circuit_open(&self) -> bool {
        if !self.is_open.load(Ordering::SeqCst) {
            return false;
        }

        let opened_at = self.opened_at.read().await;
        if let Some(opened) = *opened_at {
            if opened.elapsed() >= self.cooldown_duration {
                log::info!(
                    "Durable cache circuit breaker: cooldown expired, attempting to close circuit"
                );
                self.is_open.store(false, Ordering::SeqCst);
                return false;
            }
        }

        true
    }

    /// Gets the current failure count (for monitoring).
    pub fn failure_count(&self) -> u32 {
        self.failure_count.load(Ordering::SeqCst)
    }
}

impl Default for DurableCircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}
