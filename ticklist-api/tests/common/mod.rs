/// Common test utilities for integration tests
///
/// Provides a test context with an in-memory database, migrations applied,
/// and the full router built, plus request helpers for exercising it with
/// `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use sqlx::SqlitePool;
use ticklist_api::app::{build_router, AppState};
use ticklist_api::config::{ApiConfig, Config, DatabaseConfig, SessionConfig};
use ticklist_shared::db::migrations::run_migrations;
use ticklist_shared::db::pool::{create_pool, DatabaseConfig as PoolConfig};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-32-bytes-min!";

/// Test context containing the app and its database
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory database
    pub async fn new() -> anyhow::Result<Self> {
        let db = create_pool(PoolConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            session: SessionConfig {
                secret: TEST_SECRET.to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a request with an optional bearer token and JSON body
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request should build"),
            None => builder.body(Body::empty()).expect("request should build"),
        };

        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("request should complete")
    }

    /// Registers a user and returns their id
    pub async fn register(&self, username: &str, password: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/v1/auth/register",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = read_json(response).await;
        body["user_id"].as_i64().expect("user_id should be an integer")
    }

    /// Logs a user in and returns their session token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/v1/auth/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        body["session_token"]
            .as_str()
            .expect("session_token should be a string")
            .to_string()
    }

    /// Registers and logs in, returning the session token
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        self.register(username, password).await;
        self.login(username, password).await
    }
}

/// Reads a response body as JSON
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
