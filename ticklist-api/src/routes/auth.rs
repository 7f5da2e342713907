/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Register a new user
/// - `POST /v1/auth/login` - Verify credentials and establish a session
/// - `POST /v1/auth/logout` - End the session (client discards the token)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use ticklist_shared::{
    auth::session::{create_session_token, SessionClaims},
    models::user::User,
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username
    #[validate(length(min = 1, max = 80, message = "Username must be between 1 and 80 characters"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Id of the new user
    pub user_id: i64,

    /// Registered username
    pub username: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,

    /// Password
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Login response
///
/// The session token carries the authenticated user's id and display name;
/// subsequent requests present it as `Authorization: Bearer <token>`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// User id
    pub user_id: i64,

    /// Display name
    pub username: String,

    /// Signed session token (24h)
    pub session_token: String,
}

/// Logout response
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Confirmation message
    pub message: String,
}

/// Register a new user
///
/// Both fields must be non-empty; the username must not already be taken.
/// Only the Argon2id hash of the password is stored.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: empty username or password
/// - `409 Conflict`: username already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;

    // Pre-check for a friendlier failure; the unique constraint still backs
    // this up against races, and both paths surface the same error.
    if User::find_by_username(&state.db, &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "That username is already taken".to_string(),
        ));
    }

    let user = User::create(&state.db, &req.username, &req.password).await?;

    tracing::info!(user_id = user.id, "Registered new user");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            username: user.username,
        }),
    ))
}

/// Login endpoint
///
/// Verifies the username/password pair and returns a session token. Unknown
/// usernames and wrong passwords fail identically.
///
/// # Errors
///
/// - `422 Unprocessable Entity`: empty username or password
/// - `401 Unauthorized`: invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = User::authenticate(&state.db, &req.username, &req.password).await?;

    let claims = SessionClaims::new(user.id, &user.username);
    let session_token = create_session_token(&claims, state.session_secret())?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        session_token,
    }))
}

/// Logout endpoint
///
/// Sessions are client-held signed tokens, so logout succeeds whether or not
/// a session is present; the client clears its stored token and username.
pub async fn logout() -> Json<LogoutResponse> {
    Json(LogoutResponse {
        message: "Logged out".to_string(),
    })
}
