//! geo_gateway library: cached geocoding with provider failover
//!
//! This library resolves addresses into coordinates and coordinates into
//! addresses through an ordered set of external providers (Nominatim and its
//! replicas, Geoapify, HERE). Results are cached in two tiers: an in-process
//! TTL cache in front of a durable SQLite store. Cached lookups never reach a
//! provider; uncached ones try providers in order until one succeeds.
//!
//! # Example
//!
//! ```no_run
//! use geo_gateway::{run_server, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     bind: "0.0.0.0:8000".parse()?,
//!     ..Default::default()
//! };
//!
//! // Serves until Ctrl-C
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod cache;
pub mod config;
pub mod error_handling;
pub mod geocoding;
pub mod initialization;
pub mod models;
pub mod providers;
pub mod server;
mod storage;

// Re-export public API
pub use cache::CacheStore;
pub use config::{Config, Language, LogFormat, LogLevel, ProvidersConfig};
pub use error_handling::{GeocodeError, LookupResult, LookupStats};
pub use geocoding::{GeocodeManager, ReverseGeocodeManager};
pub use models::{Address, Coordinates, OperationResponse};
pub use providers::{Geocoder, Provider, ReverseGeocoder};
pub use run::{run_server, run_server_until};

// Internal run module (startup wiring and lifecycle)
mod run {
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio::net::TcpListener;
    use tokio_util::sync::CancellationToken;

    use crate::app::shutdown_on_signal;
    use crate::cache::CacheStore;
    use crate::config::Config;
    use crate::error_handling::LookupStats;
    use crate::geocoding::{build_geocoders, build_reversers, GeocodeManager, ReverseGeocodeManager};
    use crate::initialization::init_client;
    use crate::providers::ProviderContext;
    use crate::server::{serve, AppState};

    /// Runs the gateway until Ctrl-C (or SIGTERM).
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The cache database cannot be created, opened or migrated
    /// - The HTTP client cannot be built
    /// - The listener cannot bind to `config.bind`
    pub async fn run_server(config: Config) -> Result<()> {
        let shutdown = CancellationToken::new();
        let signal_task = tokio::spawn(shutdown_on_signal(shutdown.clone()));

        let result = run_server_until(config, shutdown.clone()).await;

        shutdown.cancel();
        let _ = signal_task.await;
        result
    }

    /// Runs the gateway until `shutdown` is cancelled.
    ///
    /// The cache store is opened once, shared by every adapter and orchestrator,
    /// and closed after the server has drained.
    pub async fn run_server_until(config: Config, shutdown: CancellationToken) -> Result<()> {
        let cache = Arc::new(
            CacheStore::open(
                &config.db_path,
                config.memory_cache_capacity,
                Duration::from_secs(config.memory_cache_ttl_secs),
            )
            .await
            .with_context(|| format!("Failed to open cache database {}", config.db_path.display()))?,
        );

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let stats = Arc::new(LookupStats::new());
        let context = ProviderContext::new(client, Arc::clone(&cache), Arc::clone(&stats));

        let geocoders = build_geocoders(&config.providers, &context);
        let reversers = build_reversers(&config.providers, &context);
        if geocoders.is_empty() {
            warn!("No geocoders configured; /geocode will fail every request");
        }
        if reversers.is_empty() {
            warn!("No reverse geocoders configured; /reverse-geocode will fail every request");
        }

        let geocoder = Arc::new(GeocodeManager::new(
            geocoders,
            Arc::clone(&cache),
            Arc::clone(&stats),
        ));
        let reverser = Arc::new(ReverseGeocodeManager::new(
            reversers,
            Arc::clone(&cache),
            Arc::clone(&stats),
        ));
        let state = AppState::new(geocoder, reverser, stats);

        let listener = TcpListener::bind(config.bind)
            .await
            .with_context(|| format!("Failed to bind {}", config.bind))?;

        let served = serve(listener, state, shutdown).await;

        info!("Closing cache store");
        cache.close().await;
        served
    }
}
