//! Error type definitions.
//!
//! This module defines the lookup error taxonomy returned by providers and
//! orchestrators, plus the internal cache, database, and initialization errors.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Outcome of a provider call or an orchestrated search.
///
/// `map`, `and_then`, and `map_err` compose lookups without control flow on
/// errors; `unwrap`/`unwrap_err` on the wrong variant is a logic bug and panics.
pub type LookupResult<T> = Result<T, GeocodeError>;

/// Errors a lookup can end with.
///
/// Provider-level variants (`Timeout` through `NoResults`) are produced by
/// adapters and drive failover. The remaining variants are produced by the
/// orchestrator itself. `Display` output is the human-readable summary exposed
/// by the endpoint layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    /// The provider did not answer within the per-call timeout.
    #[error("Request timeout.")]
    Timeout,

    /// The provider signalled quota exhaustion (HTTP 429).
    #[error("API rate limit exceeded.")]
    RateLimited,

    /// Any other non-2xx response.
    #[error("HTTP error {status}: {body}")]
    BackendHttp { status: u16, body: String },

    /// Connection-level failure (DNS, refused connection, TLS, reset).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The payload did not have the expected structure.
    #[error("Invalid response format: {0}")]
    MalformedResponse(String),

    /// The response was well formed but held no usable records.
    #[error("{0}")]
    NoResults(String),

    /// A platform was requested that is not in the registry.
    #[error("Invalid platform specified: {0}")]
    UnknownPlatform(String),

    /// The registry is empty.
    #[error("No geocoders are configured.")]
    NoProvidersConfigured,

    /// Every registered provider failed.
    #[error("All geocoding services failed.")]
    AllProvidersFailed,
}

impl GeocodeError {
    /// Fieldless category, used as a statistics key.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeocodeError::Timeout => ErrorKind::Timeout,
            GeocodeError::RateLimited => ErrorKind::RateLimited,
            GeocodeError::BackendHttp { .. } => ErrorKind::BackendHttpError,
            GeocodeError::Transport(_) => ErrorKind::TransportError,
            GeocodeError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            GeocodeError::NoResults(_) => ErrorKind::NoResults,
            GeocodeError::UnknownPlatform(_) => ErrorKind::UnknownPlatform,
            GeocodeError::NoProvidersConfigured => ErrorKind::NoProvidersConfigured,
            GeocodeError::AllProvidersFailed => ErrorKind::AllProvidersFailed,
        }
    }
}

/// Categories of lookup errors, one per [`GeocodeError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorKind {
    Timeout,
    RateLimited,
    BackendHttpError,
    TransportError,
    MalformedResponse,
    NoResults,
    UnknownPlatform,
    NoProvidersConfigured,
    AllProvidersFailed,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::BackendHttpError => "backend_http_error",
            ErrorKind::TransportError => "transport_error",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::NoResults => "no_results",
            ErrorKind::UnknownPlatform => "unknown_platform",
            ErrorKind::NoProvidersConfigured => "no_providers_configured",
            ErrorKind::AllProvidersFailed => "all_providers_failed",
        }
    }
}

/// Cache backend errors.
///
/// These never leave the cache store: they are logged and converted into a
/// miss (reads) or a no-op (writes).
#[derive(Error, Debug)]
pub enum CacheError {
    /// SQL execution error in the durable tier.
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    /// The durable tier is temporarily bypassed after repeated failures.
    #[error("Durable cache circuit is open")]
    CircuitOpen,
}

/// Error types for database setup.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}
