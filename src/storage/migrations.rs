// storage/migrations.rs
// Database migration management

use sqlx::migrate::Migrator;
use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;

/// Migrations from `migrations/`, compiled into the binary.
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates the `raw_responses` and `final_responses` tables if missing.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_migrations_are_embedded_and_idempotent() {
        assert!(MIGRATOR.iter().count() >= 1);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name LIKE '%_responses' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec!["final_responses", "raw_responses"]);
    }
}
