//! JSON status handler.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::{AppState, ErrorCounts, LookupCounts, StatusResponse};
use crate::error_handling::LookupEvent;

/// Lookup counters and per-kind error counts since startup.
pub async fn status_handler(State(state): State<AppState>) -> Response {
    let stats = &state.stats;

    let by_kind: BTreeMap<String, usize> = stats
        .error_counts()
        .into_iter()
        .map(|(kind, count)| (kind.as_str().to_string(), count))
        .collect();

    let response = StatusResponse {
        uptime_seconds: state.started.elapsed().as_secs_f64(),
        geocoders: state.geocoder.list_providers().len(),
        reversers: state.reverser.list_providers().len(),
        lookups: LookupCounts {
            searches: stats.get_event_count(LookupEvent::Search),
            final_cache_hits: stats.get_event_count(LookupEvent::FinalCacheHit),
            raw_cache_hits: stats.get_event_count(LookupEvent::RawCacheHit),
            provider_attempts: stats.get_event_count(LookupEvent::ProviderAttempt),
            resolved: stats.get_event_count(LookupEvent::Resolved),
        },
        errors: ErrorCounts {
            total: stats.total_errors(),
            by_kind,
        },
    };

    (StatusCode::OK, Json(response)).into_response()
}
