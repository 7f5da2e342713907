/// Authentication context for Axum handlers
///
/// The API server validates the Bearer session token in a middleware layer
/// and inserts an `AuthContext` into request extensions. Handlers take the
/// acting user's identity from this context and pass it explicitly into every
/// repository call; nothing in the core reads ambient session state.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use ticklist_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {} (user {})!", auth.username, auth.user_id)
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::session::SessionClaims;

/// Authentication context added to request extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: i64,

    /// Display name of the authenticated user
    pub username: String,
}

impl AuthContext {
    /// Creates an auth context from validated session claims
    pub fn from_session(claims: &SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username.clone(),
        }
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Session token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_from_session() {
        let claims = SessionClaims::new(3, "bob");
        let ctx = AuthContext::from_session(&claims);
        assert_eq!(ctx.user_id, 3);
        assert_eq!(ctx.username, "bob");
    }
}
