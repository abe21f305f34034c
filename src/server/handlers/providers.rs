//! `/geocoders` and `/reversers`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::AppState;
use super::detail;
use crate::models::{ProviderInfo, ProvidersResponse};

fn listing(providers: Vec<ProviderInfo>, empty_message: &str) -> Response {
    if providers.is_empty() {
        return detail(StatusCode::NOT_FOUND, empty_message);
    }
    Json(ProvidersResponse {
        geocoders: providers,
    })
    .into_response()
}

pub async fn geocoders_handler(State(state): State<AppState>) -> Response {
    listing(state.geocoder.list_providers(), "No geocoders are configured.")
}

pub async fn reversers_handler(State(state): State<AppState>) -> Response {
    listing(
        state.reverser.list_providers(),
        "No reverse geocoders are configured.",
    )
}
