//! # ticklist API server
//!
//! A small multi-user to-do list service: accounts, sessions, and per-user
//! task lists with filtering and sorting.
//!
//! ## Usage
//!
//! ```bash
//! SESSION_SECRET=$(openssl rand -hex 32) cargo run -p ticklist-api
//! ```

use ticklist_api::app::{build_router, AppState};
use ticklist_api::config::Config;
use ticklist_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticklist_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "ticklist API server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    pool::close_pool(db).await;

    Ok(())
}
