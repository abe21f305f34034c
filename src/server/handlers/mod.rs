//! HTTP handlers.

mod lookup;
mod providers;
mod status;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::types::ErrorDetail;

pub use lookup::{geocode_handler, reverse_geocode_handler};
pub use providers::{geocoders_handler, reversers_handler};
pub use status::status_handler;

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDetail {
            detail: message.into(),
        }),
    )
        .into_response()
}
