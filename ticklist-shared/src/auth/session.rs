/// Session token generation and validation
///
/// A session is a signed HS256 token carrying the authenticated user's id and
/// username. It is established at login, presented by the client on every
/// request, and "cleared" at logout by the client discarding it; the server
/// keeps no session table.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC-SHA256)
/// - **Expiration**: 24 hours
/// - **Validation**: signature, expiration, and issuer checks
/// - **Secret**: must be at least 32 bytes
///
/// # Example
///
/// ```
/// use ticklist_shared::auth::session::{create_session_token, validate_session_token, SessionClaims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = SessionClaims::new(42, "alice");
/// let token = create_session_token(&claims, "a-secret-key-of-at-least-32-bytes!!")?;
///
/// let validated = validate_session_token(&token, "a-secret-key-of-at-least-32-bytes!!")?;
/// assert_eq!(validated.sub, 42);
/// assert_eq!(validated.username, "alice");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer embedded in every session token
const ISSUER: &str = "ticklist";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Invalid session token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Session has expired")]
    Expired,
}

/// Claims carried by a session token
///
/// # Standard Claims
///
/// - `sub`: Subject (user id)
/// - `iss`: Issuer (always "ticklist")
/// - `iat` / `exp` / `nbf`: issued-at, expiration, not-before timestamps
///
/// # Custom Claims
///
/// - `username`: display name of the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user id
    pub sub: i64,

    /// Display name of the authenticated user
    pub username: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl SessionClaims {
    /// Session lifetime
    pub fn lifetime() -> Duration {
        Duration::hours(24)
    }

    /// Creates claims for a freshly authenticated user
    pub fn new(user_id: i64, username: &str) -> Self {
        Self::with_expiration(user_id, username, Self::lifetime())
    }

    /// Creates claims with a custom expiration (used by expiry tests)
    pub fn with_expiration(user_id: i64, username: &str, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            username: username.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }
}

/// Creates a signed session token from claims
///
/// # Errors
///
/// Returns `SessionError::CreateError` if signing fails.
pub fn create_session_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| SessionError::CreateError(e.to_string()))
}

/// Validates a session token and returns its claims
///
/// Checks signature, expiration, and issuer.
///
/// # Errors
///
/// - `SessionError::Expired` if the token's expiration has passed
/// - `SessionError::ValidationError` for any other invalid token
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        _ => SessionError::ValidationError(e.to_string()),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_token_roundtrip() {
        let claims = SessionClaims::new(7, "alice");
        let token = create_session_token(&claims, SECRET).expect("Token should be created");

        let validated = validate_session_token(&token, SECRET).expect("Token should validate");
        assert_eq!(validated.sub, 7);
        assert_eq!(validated.username, "alice");
        assert_eq!(validated.iss, "ticklist");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = SessionClaims::new(7, "alice");
        let token = create_session_token(&claims, SECRET).expect("Token should be created");

        let result = validate_session_token(&token, "another-secret-key-also-32-bytes-long");
        assert!(matches!(result, Err(SessionError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Expired well past jsonwebtoken's default leeway.
        let claims = SessionClaims::with_expiration(7, "alice", Duration::hours(-2));
        let token = create_session_token(&claims, SECRET).expect("Token should be created");

        let result = validate_session_token(&token, SECRET);
        assert!(matches!(result, Err(SessionError::Expired)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = validate_session_token("not.a.token", SECRET);
        assert!(matches!(result, Err(SessionError::ValidationError(_))));
    }
}
