//! HTTP endpoint layer.
//!
//! Provides:
//! - `/geocode` - address to coordinates
//! - `/reverse-geocode` - coordinates to addresses
//! - `/geocoders`, `/reversers` - configured providers in priority order
//! - `/status` - lookup and error counters

mod handlers;
mod types;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use handlers::{
    geocode_handler, geocoders_handler, reverse_geocode_handler, reversers_handler,
    status_handler,
};
pub use types::{AppState, ErrorCounts, ErrorDetail, LookupCounts, StatusResponse};

/// Builds the router with every endpoint mounted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/geocode", get(geocode_handler))
        .route("/reverse-geocode", get(reverse_geocode_handler))
        .route("/geocoders", get(geocoders_handler))
        .route("/reversers", get(reversers_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Serves requests on `listener` until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    let addr = listener
        .local_addr()
        .map_err(|e| anyhow::anyhow!("Failed to read listener address: {}", e))?;

    log::info!("Geocoding gateway listening on http://{}/", addr);
    log::info!("  - Geocode: http://{}/geocode?address=...", addr);
    log::info!("  - Reverse: http://{}/reverse-geocode?latitude=...&longitude=...", addr);
    log::info!("  - Status: http://{}/status", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    log::info!("Server stopped accepting connections");
    Ok(())
}
