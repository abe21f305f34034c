//! Shared test helpers for storage and cache tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
///
/// Every `sqlite::memory:` connection gets its own database, so the pool is
/// pinned to a single connection to keep the schema visible to all queries.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}
