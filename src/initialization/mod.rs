//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared process resources:
//! - HTTP client (timeouts, default User-Agent)
//! - Logger (plain or JSON output)
//!
//! The cache store is opened by [`CacheStore::open`](crate::cache::CacheStore::open).

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
