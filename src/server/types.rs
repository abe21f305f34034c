//! Endpoint layer data structures.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error_handling::LookupStats;
use crate::geocoding::{GeocodeManager, ReverseGeocodeManager};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub geocoder: Arc<GeocodeManager>,
    pub reverser: Arc<ReverseGeocodeManager>,
    pub stats: Arc<LookupStats>,
    pub started: Instant,
}

impl AppState {
    pub fn new(
        geocoder: Arc<GeocodeManager>,
        reverser: Arc<ReverseGeocodeManager>,
        stats: Arc<LookupStats>,
    ) -> Self {
        Self {
            geocoder,
            reverser,
            stats,
            started: Instant::now(),
        }
    }
}

/// Query string of `/geocode`.
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub address: String,
    pub platform: Option<String>,
}

/// Query string of `/reverse-geocode`.
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub platform: Option<String>,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// JSON response for `/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub geocoders: usize,
    pub reversers: usize,
    pub lookups: LookupCounts,
    pub errors: ErrorCounts,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookupCounts {
    pub searches: usize,
    pub final_cache_hits: usize,
    pub raw_cache_hits: usize,
    pub provider_attempts: usize,
    pub resolved: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorCounts {
    pub total: usize,
    pub by_kind: BTreeMap<String, usize>,
}
