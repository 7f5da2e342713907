/// Error handling for the API server
///
/// A unified error type that maps domain outcomes to HTTP responses. Handlers
/// return `Result<T, ApiError>`; every error converts to a rendered JSON
/// response, so no request ever ends without a page or redirect equivalent.
///
/// # Example
///
/// ```ignore
/// use ticklist_api::error::ApiResult;
/// use axum::Json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     let data = fetch_data().await?;
///     Ok(Json(serde_json::json!({ "data": data })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use ticklist_shared::auth::middleware::AuthError;
use ticklist_shared::auth::session::SessionError;
use ticklist_shared::models::task::TaskError;
use ticklist_shared::models::user::UserError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404) - also covers "owned by someone else"
    NotFound(String),

    /// Conflict (409) - duplicate username
    Conflict(String),

    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "conflict")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert user account errors to API errors
impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameTaken => ApiError::Conflict(err.to_string()),
            UserError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            UserError::Password(e) => {
                ApiError::InternalError(format!("Password operation failed: {}", e))
            }
            UserError::Database(e) => e.into(),
        }
    }
}

/// Convert task repository errors to API errors
impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::EmptyContent => ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "content".to_string(),
                message: err.to_string(),
            }]),
            TaskError::NotFound => ApiError::NotFound(err.to_string()),
            TaskError::Database(e) => e.into(),
        }
    }
}

/// Convert session token errors to API errors
impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Expired => ApiError::Unauthorized("Session has expired".to_string()),
            SessionError::ValidationError(msg) => {
                ApiError::Unauthorized(format!("Invalid session token: {}", msg))
            }
            SessionError::CreateError(msg) => {
                ApiError::InternalError(format!("Failed to create session token: {}", msg))
            }
        }
    }
}

/// Convert auth middleware errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => {
                ApiError::Unauthorized("Missing credentials".to_string())
            }
            AuthError::InvalidFormat(msg) => ApiError::BadRequest(msg),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        }
    }
}

/// Convert request validation failures to API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::ValidationError(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");
    }

    #[test]
    fn test_task_not_found_collapses_ownership() {
        let err: ApiError = TaskError::NotFound.into();
        match err {
            ApiError::NotFound(msg) => {
                // One message for both "absent" and "not yours".
                assert!(msg.contains("not found"));
                assert!(msg.contains("permission"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_content_maps_to_validation_error() {
        let err: ApiError = TaskError::EmptyContent.into();
        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "content");
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }
}
