//! Row-level access to the response tables.
//!
//! Table names cannot be bound as parameters, so each namespace maps to its own
//! static statements rather than a formatted query string.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::cache::Namespace;

fn select_sql(namespace: Namespace) -> &'static str {
    match namespace {
        Namespace::Raw => "SELECT value FROM raw_responses WHERE key = ?",
        Namespace::Final => "SELECT value FROM final_responses WHERE key = ?",
    }
}

fn upsert_sql(namespace: Namespace) -> &'static str {
    match namespace {
        Namespace::Raw => {
            "INSERT OR REPLACE INTO raw_responses (key, value, timestamp) VALUES (?, ?, ?)"
        }
        Namespace::Final => {
            "INSERT OR REPLACE INTO final_responses (key, value, timestamp) VALUES (?, ?, ?)"
        }
    }
}

/// Fetches the stored value for `key`, if any.
pub async fn fetch_response(
    pool: &SqlitePool,
    namespace: Namespace,
    key: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(select_sql(namespace))
        .bind(key)
        .fetch_optional(pool)
        .await
}

/// Inserts or replaces the row for `key`, stamping it with the current time.
///
/// A single statement, so a cancelled write either lands completely or not at all.
pub async fn upsert_response(
    pool: &SqlitePool,
    namespace: Namespace,
    key: &str,
    value: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(upsert_sql(namespace))
        .bind(key)
        .bind(value)
        .bind(Utc::now().timestamp_millis())
        .execute(pool)
        .await?;
    Ok(())
}
