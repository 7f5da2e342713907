/// Database migration runner
///
/// Migrations live in the `migrations/` directory of this crate and are
/// embedded at compile time via `sqlx::migrate!`. The schema is two tables:
/// `users` and `tasks`, with a cascading foreign key from tasks to users.
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::db::migrations::run_migrations;
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::SqlitePool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Each migration runs in a transaction; a failed migration is rolled back
/// and returned as an error.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::{create_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_migrations_create_schema() {
        let pool = create_pool(DatabaseConfig::in_memory())
            .await
            .expect("pool should open");
        run_migrations(&pool).await.expect("migrations should run");

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'tasks')",
        )
        .fetch_one(&pool)
        .await
        .expect("schema query should succeed");

        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_pool(DatabaseConfig::in_memory())
            .await
            .expect("pool should open");
        run_migrations(&pool).await.expect("first run should succeed");
        run_migrations(&pool).await.expect("second run should be a no-op");
    }
}
