/// Database connection pool management
///
/// This module provides the SQLite connection pool used by the whole
/// application. Foreign key enforcement is switched on for every connection;
/// the cascade from `users` to `tasks` depends on it.
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: "sqlite://ticklist.db".to_string(),
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///
///     let row: (i64,) = sqlx::query_as("SELECT ?")
///         .bind(42i64)
///         .fetch_one(&pool)
///         .await?;
///
///     Ok(())
/// }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g., "sqlite://ticklist.db" or "sqlite::memory:")
    pub url: String,

    /// Maximum number of connections in the pool
    ///
    /// Must be 1 for `sqlite::memory:` databases, where every connection
    /// would otherwise see its own empty database.
    pub max_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub connect_timeout_seconds: u64,

    /// Whether to create the database file if it does not exist
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            connect_timeout_seconds: 30,
            create_if_missing: true,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a single-connection in-memory database.
    ///
    /// Used by tests; migrations still have to be run on the resulting pool.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        }
    }
}

/// Creates and initializes a SQLite connection pool
///
/// This function:
/// 1. Creates a pool with the specified configuration
/// 2. Enables foreign key enforcement on every connection
/// 3. Performs a health check to verify the database is usable
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database cannot be opened,
/// or the health check fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(config.create_if_missing)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect_with(connect_options)
        .await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection
///
/// Executes a trivial query to verify the database is reachable and responding.
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        Ok(())
    } else {
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Gracefully closes the connection pool
///
/// Called during application shutdown so the database file is released cleanly.
pub async fn close_pool(pool: SqlitePool) {
    info!("Closing database connection pool");
    pool.close().await;
}
