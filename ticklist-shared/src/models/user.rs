/// User model and database operations
///
/// A user owns zero-or-more tasks. Accounts are created at registration and
/// never updated afterwards; deletion cascades to the user's tasks at the
/// storage layer.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::models::user::User;
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
///
/// let user = User::create(&pool, "alice", "pw1").await?;
/// let same = User::authenticate(&pool, "alice", "pw1").await?;
/// assert_eq!(user.id, same.id);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::password::{hash_password, verify_password, PasswordError};

/// Error type for user account operations
///
/// Expected domain outcomes (`UsernameTaken`, `InvalidCredentials`) are
/// separate variants from unexpected storage failures.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// The requested username is already registered
    #[error("That username is already taken")]
    UsernameTaken,

    /// Login failed; deliberately uniform for unknown username and wrong
    /// password so callers cannot enumerate accounts
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Password hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Unexpected storage failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user id (monotonically assigned)
    pub id: i64,

    /// Unique display name, matched exactly (case-sensitive)
    pub username: String,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Registers a new user
    ///
    /// Hashes the password and inserts the account. Uniqueness is enforced by
    /// the storage layer: a duplicate username fails with
    /// `UserError::UsernameTaken` and leaves no partial state behind.
    ///
    /// Callers may also pre-check with [`User::find_by_username`]; both paths
    /// surface the same error to the end user.
    pub async fn create(pool: &SqlitePool, username: &str, password: &str) -> Result<Self, UserError> {
        let password_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
                    return UserError::UsernameTaken;
                }
            }
            UserError::Database(e)
        })?;

        Ok(user)
    }

    /// Verifies a username/password pair and returns the account
    ///
    /// Fails with `UserError::InvalidCredentials` both when the username is
    /// unknown and when the password does not match; the two cases are
    /// indistinguishable to the caller.
    pub async fn authenticate(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<Self, UserError> {
        let user = Self::find_by_username(pool, username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if verify_password(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(UserError::InvalidCredentials)
        }
    }

    /// Finds a user by id
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Finds a user by username (exact match)
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Deletes a user by id
    ///
    /// Administrative operation; the cascading foreign key removes all of the
    /// user's tasks in the same statement.
    ///
    /// Returns true if the user existed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts registered users
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
        };

        let json = serde_json::to_string(&user).expect("serialization should succeed");
        assert!(json.contains("alice"));
        assert!(!json.contains("argon2id"));
    }

    // Database-backed tests are in tests/user_account_tests.rs
}
