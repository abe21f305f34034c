// Shared test helpers: cache setup and local HTTP stubs standing in for providers.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use geo_gateway::cache::{CacheStore, MemoryTier};
use geo_gateway::initialization::init_client;
use geo_gateway::providers::ProviderContext;
use geo_gateway::{Config, LookupStats};

/// Opens a file-backed cache store in `dir`.
#[allow(dead_code)]
pub async fn open_cache(dir: &Path) -> Arc<CacheStore> {
    Arc::new(
        CacheStore::open(&dir.join("cache.db"), 1_000, Duration::from_secs(60))
            .await
            .expect("Failed to open cache store"),
    )
}

/// A cache store with two in-memory tiers, for tests that don't need SQLite.
#[allow(dead_code)]
pub fn memory_cache() -> Arc<CacheStore> {
    Arc::new(CacheStore::new(
        Arc::new(MemoryTier::new(1_000, Duration::from_secs(60))),
        Arc::new(MemoryTier::new(1_000, Duration::from_secs(60))),
    ))
}

/// Provider context around the production client, with a short timeout.
#[allow(dead_code)]
pub fn provider_context(cache: Arc<CacheStore>, stats: Arc<LookupStats>) -> ProviderContext {
    let config = Config {
        timeout_seconds: 5,
        ..Default::default()
    };
    let client = init_client(&config).expect("Failed to build client");
    ProviderContext::new(client, cache, stats)
}

/// A canned HTTP endpoint that records how often it was hit.
pub struct StubProvider {
    status: StatusCode,
    body: String,
    hits: AtomicUsize,
    last_user_agent: Mutex<Option<String>>,
    last_query: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl StubProvider {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_user_agent(&self) -> Option<String> {
        self.last_user_agent.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

async fn stub_handler(
    State(stub): State<Arc<StubProvider>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    *stub.last_user_agent.lock().unwrap() = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *stub.last_query.lock().unwrap() = query;
    (
        stub.status,
        [("content-type", "application/json")],
        stub.body.clone(),
    )
        .into_response()
}

/// Serves `body` with `status` on every path of an ephemeral port.
/// Returns the base URL (`http://127.0.0.1:<port>`) and the stub handle.
#[allow(dead_code)]
pub async fn spawn_stub(status: StatusCode, body: &str) -> (String, Arc<StubProvider>) {
    let stub = Arc::new(StubProvider {
        status,
        body: body.to_string(),
        hits: AtomicUsize::new(0),
        last_user_agent: Mutex::new(None),
        last_query: Mutex::new(None),
    });

    let app = Router::new()
        .route("/", get(stub_handler))
        .route("/{*path}", get(stub_handler))
        .with_state(Arc::clone(&stub));
    let addr = spawn_router(app).await;
    (format!("http://{}", addr), stub)
}

/// Serves `app` on an ephemeral localhost port.
#[allow(dead_code)]
pub async fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}
