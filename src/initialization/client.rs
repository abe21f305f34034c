//! HTTP client initialization.
//!
//! One client is built per process and shared by every provider adapter, so
//! connections are pooled across providers and requests.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes the shared HTTP client.
///
/// The timeout (`config.timeout_seconds`) applies to each provider call on its
/// own. No default `User-Agent` is set; adapters that need one add it per request.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()?;
    Ok(Arc::new(client))
}
