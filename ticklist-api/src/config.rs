/// Configuration management for the API server
///
/// Loads configuration from environment variables into a type-safe struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://ticklist.db)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
/// - `API_HOST`: Host to bind to (default: 127.0.0.1)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `SESSION_SECRET`: Secret key for signing session tokens (required)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use ticklist_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session token configuration
    pub session: SessionConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret key for signing session tokens
    ///
    /// Must be kept secret and at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `SESSION_SECRET` is missing or too short, or if a
    /// numeric variable fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://ticklist.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;

        if session_secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 characters long");
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            session: SessionConfig {
                secret: session_secret,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite://test.db".to_string(),
                max_connections: 5,
            },
            session: SessionConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
