//! Lookup statistics tracking.
//!
//! This module provides thread-safe counters for lookup errors and notable
//! events (cache hits, provider attempts) shared between the orchestrators,
//! the provider context, and the status endpoint.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;

use super::types::ErrorKind;

/// Notable events during a lookup that are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum LookupEvent {
    /// A `search` call was received by an orchestrator.
    Search,
    /// A search was answered from the final-response cache.
    FinalCacheHit,
    /// A provider call was answered from the raw-response cache.
    RawCacheHit,
    /// A provider adapter was invoked by an orchestrator.
    ProviderAttempt,
    /// A search produced a successful, freshly computed result.
    Resolved,
}

impl LookupEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupEvent::Search => "search",
            LookupEvent::FinalCacheHit => "final_cache_hit",
            LookupEvent::RawCacheHit => "raw_cache_hit",
            LookupEvent::ProviderAttempt => "provider_attempt",
            LookupEvent::Resolved => "resolved",
        }
    }
}

/// Thread-safe lookup statistics tracker.
///
/// Every counter is created up front, so increments are lock-free atomic adds
/// and the struct can be shared across tasks with `Arc`.
pub struct LookupStats {
    errors: HashMap<ErrorKind, AtomicUsize>,
    events: HashMap<LookupEvent, AtomicUsize>,
}

impl LookupStats {
    pub fn new() -> Self {
        let errors = ErrorKind::iter()
            .map(|kind| (kind, AtomicUsize::new(0)))
            .collect();
        let events = LookupEvent::iter()
            .map(|event| (event, AtomicUsize::new(0)))
            .collect();

        LookupStats { errors, events }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, kind: ErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map.",
                kind
            );
        }
    }

    /// Increment an event counter.
    pub fn increment_event(&self, event: LookupEvent) {
        if let Some(counter) = self.events.get(&event) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment event counter for {:?} which is not in the map.",
                event
            );
        }
    }

    /// Get the count for an error kind.
    pub fn get_error_count(&self, kind: ErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get the count for an event.
    pub fn get_event_count(&self, event: LookupEvent) -> usize {
        self.events
            .get(&event)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of recorded errors across all kinds.
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Snapshot of every error counter, in declaration order.
    pub fn error_counts(&self) -> Vec<(ErrorKind, usize)> {
        ErrorKind::iter()
            .map(|kind| (kind, self.get_error_count(kind)))
            .collect()
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}
