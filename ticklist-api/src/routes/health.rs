/// Health check endpoint
///
/// `GET /health` reports whether the server is up and whether the database
/// answers queries, reusing the same probe that gates pool creation at
/// startup. The handler is infallible: an unreachable database degrades the
/// report instead of failing the request.
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use ticklist_shared::db::pool;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,
}

impl HealthResponse {
    /// Builds the report for the current process given the database probe
    /// outcome; overall status follows database reachability.
    fn current(database_reachable: bool) -> Self {
        let (status, database) = if database_reachable {
            ("healthy", "connected")
        } else {
            ("degraded", "disconnected")
        };

        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
        }
    }
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_reachable = pool::health_check(&state.db).await.is_ok();
    Json(HealthResponse::current(database_reachable))
}
