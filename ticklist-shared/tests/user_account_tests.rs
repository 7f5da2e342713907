/// Integration tests for user registration and authentication

use ticklist_shared::db::migrations::run_migrations;
use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
use ticklist_shared::models::user::{User, UserError};
use sqlx::SqlitePool;

async fn setup() -> SqlitePool {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("in-memory pool should open");
    run_migrations(&pool).await.expect("migrations should run");
    pool
}

#[tokio::test]
async fn test_register_stores_hash_not_plaintext() {
    let pool = setup().await;

    let user = User::create(&pool, "alice", "pw1").await.expect("create should succeed");
    assert_eq!(user.username, "alice");
    assert_ne!(user.password_hash, "pw1");
    assert!(user.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_register_hashes_same_password_differently() {
    let pool = setup().await;

    let alice = User::create(&pool, "alice", "shared-pw").await.expect("create should succeed");
    let bob = User::create(&pool, "bob", "shared-pw").await.expect("create should succeed");

    // Per-password random salt: identical passwords never share a hash.
    assert_ne!(alice.password_hash, bob.password_hash);
}

#[tokio::test]
async fn test_duplicate_username_fails_without_mutating_state() {
    let pool = setup().await;

    User::create(&pool, "alice", "pw1").await.expect("first create should succeed");

    let result = User::create(&pool, "alice", "pw2").await;
    assert!(matches!(result, Err(UserError::UsernameTaken)));

    let count = User::count(&pool).await.expect("count should succeed");
    assert_eq!(count, 1, "failed registration must not add a user");
}

#[tokio::test]
async fn test_authenticate_success() {
    let pool = setup().await;

    let created = User::create(&pool, "alice", "pw1").await.expect("create should succeed");
    let authed = User::authenticate(&pool, "alice", "pw1").await.expect("auth should succeed");
    assert_eq!(authed.id, created.id);
}

#[tokio::test]
async fn test_authenticate_failures_are_indistinguishable() {
    let pool = setup().await;

    User::create(&pool, "alice", "pw1").await.expect("create should succeed");

    let unknown_user = User::authenticate(&pool, "nobody", "anything").await;
    let wrong_password = User::authenticate(&pool, "alice", "wrong").await;

    // Both paths fail with the same error kind and the same user-facing
    // message, so callers cannot enumerate usernames.
    let unknown_err = unknown_user.expect_err("unknown user should fail");
    let wrong_err = wrong_password.expect_err("wrong password should fail");
    assert!(matches!(unknown_err, UserError::InvalidCredentials));
    assert!(matches!(wrong_err, UserError::InvalidCredentials));
    assert_eq!(unknown_err.to_string(), wrong_err.to_string());
}

#[tokio::test]
async fn test_username_lookup_is_case_sensitive() {
    let pool = setup().await;

    User::create(&pool, "alice", "pw1").await.expect("create should succeed");

    let found = User::find_by_username(&pool, "Alice").await.expect("query should succeed");
    assert!(found.is_none(), "username matching is exact");

    let result = User::authenticate(&pool, "Alice", "pw1").await;
    assert!(matches!(result, Err(UserError::InvalidCredentials)));
}
