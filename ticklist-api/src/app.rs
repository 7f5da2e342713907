/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use ticklist_api::{app::AppState, config::Config};
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(pool, config);
/// let app = ticklist_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use ticklist_shared::auth::{
    middleware::{AuthContext, AuthError},
    session,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session signing secret
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check (public)
/// └── /v1/                          # API v1 (versioned)
///     ├── /auth/
///     │   ├── POST /register        # Create account (public)
///     │   ├── POST /login           # Establish session (public)
///     │   └── POST /logout          # Advisory; session is client-held
///     └── /tasks/
///         ├── GET    /              # List (empty when unauthenticated)
///         ├── POST   /              # Add task (authenticated)
///         ├── GET    /:id           # Fetch one, pre-fills the edit form
///         ├── PUT    /:id           # Edit content
///         ├── GET    /:id/toggle    # Flip completion flag
///         └── DELETE /:id           # Remove task
/// ```
///
/// The task listing is deliberately outside the auth layer: an
/// unauthenticated caller gets an empty list, not an error, mirroring a
/// logged-out home page that shows nothing.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout));

    // Task reads that tolerate a missing session
    let task_read_routes = Router::new().route("/", get(routes::tasks::list_tasks));

    // Task operations that require an authenticated session
    let task_write_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::edit_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/toggle", get(routes::tasks::toggle_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tasks", task_read_routes.merge(task_write_routes));

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Extracts and validates the Bearer session token from the Authorization
/// header, then injects an `AuthContext` into request extensions. Handlers
/// behind this layer receive the acting user's identity explicitly and pass
/// it into every repository call.
async fn session_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = session::validate_session_token(token, state.session_secret())
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    req.extensions_mut()
        .insert(AuthContext::from_session(&claims));

    Ok(next.run(req).await)
}

/// Resolves the caller's identity from request headers, if any
///
/// Used by routes where authentication is optional. A missing, malformed, or
/// invalid token yields `None` rather than an error.
pub fn optional_session(state: &AppState, headers: &HeaderMap) -> Option<AuthContext> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?;
    let claims = session::validate_session_token(token, state.session_secret()).ok()?;
    Some(AuthContext::from_session(&claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticklist_shared::auth::session::{create_session_token, SessionClaims};

    fn test_state() -> AppState {
        let config = Config {
            api: crate::config::ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: crate::config::DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: crate::config::SessionConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
        };
        let pool = SqlitePool::connect_lazy("sqlite::memory:").expect("lazy pool");
        AppState::new(pool, config)
    }

    #[tokio::test]
    async fn test_optional_session_absent_header() {
        let state = test_state();
        assert!(optional_session(&state, &HeaderMap::new()).is_none());
    }

    #[tokio::test]
    async fn test_optional_session_valid_token() {
        let state = test_state();
        let claims = SessionClaims::new(1, "alice");
        let token = create_session_token(&claims, state.session_secret()).expect("token");

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().expect("header value"),
        );

        let auth = optional_session(&state, &headers).expect("should authenticate");
        assert_eq!(auth.user_id, 1);
        assert_eq!(auth.username, "alice");
    }

    #[tokio::test]
    async fn test_optional_session_garbage_token() {
        let state = test_state();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer not.a.token".parse().expect("header value"),
        );
        assert!(optional_session(&state, &headers).is_none());
    }
}
