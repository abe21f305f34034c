//! `/geocode` and `/reverse-geocode`.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::types::{AppState, GeocodeQuery, ReverseGeocodeQuery};
use super::detail;
use crate::models::{Coordinates, OperationResponse};

/// Address to coordinates. Lookup failures map to 404, bad input to 422.
pub async fn geocode_handler(
    State(state): State<AppState>,
    query: Result<Query<GeocodeQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return detail(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()),
    };

    let address = query.address.trim();
    if address.is_empty() {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "address must not be empty");
    }

    match state.geocoder.lookup(address, query.platform.as_deref()).await {
        Ok(coordinates) => Json(OperationResponse::ok(coordinates)).into_response(),
        Err(e) => detail(StatusCode::NOT_FOUND, e.to_string()),
    }
}

/// Coordinates to addresses. Lookup failures map to 404, bad input to 422.
pub async fn reverse_geocode_handler(
    State(state): State<AppState>,
    query: Result<Query<ReverseGeocodeQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return detail(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()),
    };

    let coordinates = match Coordinates::new(query.latitude, query.longitude) {
        Ok(coordinates) => coordinates,
        Err(e) => return detail(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    };

    match state
        .reverser
        .lookup(&coordinates, query.platform.as_deref())
        .await
    {
        Ok(addresses) => Json(OperationResponse::ok(addresses)).into_response(),
        Err(e) => detail(StatusCode::NOT_FOUND, e.to_string()),
    }
}
