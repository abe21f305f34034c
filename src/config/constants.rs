//! Configuration constants.
//!
//! This module defines the defaults used by the service: cache sizing and
//! expiry, provider endpoints, timeouts, and other operational parameters.

use std::time::Duration;

/// Default SQLite file backing the durable cache tier.
pub const DB_PATH: &str = "geocoding_cache.db";

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

// Tier-1 cache
/// Time-to-live applied to every tier-1 entry (24 hours).
///
/// Tier-2 entries never expire; this bound only applies to the in-memory layer,
/// which is rebuilt from tier-2 through promotion.
pub const MEMORY_CACHE_TTL_SECS: u64 = 24 * 60 * 60;
/// Maximum number of entries held by the tier-1 cache.
pub const MEMORY_CACHE_CAPACITY: u64 = 100_000;

// Durable tier protection
/// Consecutive tier-2 failures before the circuit opens.
pub const DURABLE_FAILURE_THRESHOLD: u32 = 5;
/// How long tier-2 stays bypassed once the circuit has opened.
pub const DURABLE_COOLDOWN: Duration = Duration::from_secs(60);

// Provider calls
/// Per-provider request timeout in seconds.
///
/// There is no deadline shared across the failover loop; every provider call
/// carries this timeout independently.
pub const PROVIDER_TIMEOUT_SECS: u64 = 30;
/// Maximum number of characters of an error body kept in a `BackendHttp` error.
pub const MAX_ERROR_BODY_LENGTH: usize = 500;
/// Maximum number of results requested from Nominatim search.
pub const NOMINATIM_RESULT_LIMIT: u32 = 5;

/// Default User-Agent sent to Nominatim.
///
/// The public Nominatim usage policy requires an identifying User-Agent, so
/// deployments should override this via `NOMINATIM_USER_AGENT`.
pub const DEFAULT_USER_AGENT: &str = "geo_gateway/0.1 (+https://nominatim.org/release-docs/latest/api/Overview/)";

// Provider endpoints
pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";
pub const GEOAPIFY_REVERSE_URL: &str = "https://api.geoapify.com/v1/geocode/reverse";
pub const HERE_REVERSE_URL: &str = "https://revgeocode.search.hereapi.com/v1/revgeocode";

// Registry names
pub const NOMINATIM_PROVIDER: &str = "NOMINATIM";
pub const NOMINATIM_REPLICA_PREFIX: &str = "NOMINATIM_REPLICA_";
pub const GEOAPIFY_PROVIDER: &str = "GEOAPIFY";
pub const HERE_PROVIDER: &str = "HERE";

/// Platform token used in final-response keys when no platform was requested.
pub const ANY_PLATFORM: &str = "any";

/// Default placeholder template for [`Address::format_address`](crate::Address::format_address).
///
/// `%h` house, `%r` street, `%t` settlement, `%s` state, `%c` country,
/// `%p` postcode, `%d` district, `%u` suburb.
pub const DEFAULT_ADDRESS_TEMPLATE: &str = "%h %r, %t, %s, %c";

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
