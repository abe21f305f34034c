// storage/mod.rs
// SQLite persistence for the durable cache tier

pub mod circuit_breaker;
pub mod migrations;
pub mod pool;
pub mod responses;

#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used items
pub use circuit_breaker::DurableCircuitBreaker;
pub use migrations::run_migrations;
pub use pool::init_db_pool_with_path;
pub use responses::{fetch_response, upsert_response};
