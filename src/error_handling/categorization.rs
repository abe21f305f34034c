//! Error categorization for provider HTTP calls.
//!
//! Maps transport failures and non-success HTTP statuses onto the lookup error
//! taxonomy, so adapters never hand raw `reqwest` errors to the orchestrator.

use crate::config::{HTTP_STATUS_TOO_MANY_REQUESTS, MAX_ERROR_BODY_LENGTH};

use super::types::GeocodeError;

/// Categorizes a non-2xx response.
///
/// 429 is the provider's own rate-limit signal; every other status becomes a
/// `BackendHttp` error carrying a bounded prefix of the response body.
pub fn classify_status(status: u16, body: &str) -> GeocodeError {
    if status == HTTP_STATUS_TOO_MANY_REQUESTS {
        return GeocodeError::RateLimited;
    }

    GeocodeError::BackendHttp {
        status,
        body: truncate_body(body),
    }
}

/// Categorizes a `reqwest::Error` raised before a response was available.
pub fn classify_transport(error: &reqwest::Error) -> GeocodeError {
    if error.is_timeout() {
        GeocodeError::Timeout
    } else if let Some(status) = error.status() {
        classify_status(status.as_u16(), "")
    } else if error.is_decode() || error.is_body() {
        GeocodeError::MalformedResponse(error.to_string())
    } else {
        GeocodeError::Transport(error.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_LENGTH {
        return trimmed.to_string();
    }
    let mut truncated: String = trimmed.chars().take(MAX_ERROR_BODY_LENGTH).collect();
    truncated.push_str("...");
    truncated
}
