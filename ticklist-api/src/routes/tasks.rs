/// Task endpoints
///
/// Every handler here resolves the acting user first and passes that id into
/// the repository; the repository applies it as a filter predicate on every
/// query, so no request can observe or mutate another user's tasks.
///
/// # Endpoints
///
/// - `GET /v1/tasks?status=&sort=` - List tasks (empty when unauthenticated)
/// - `POST /v1/tasks` - Add a task
/// - `GET /v1/tasks/:id` - Fetch one task (pre-fills the edit form)
/// - `PUT /v1/tasks/:id` - Replace a task's content
/// - `GET /v1/tasks/:id/toggle` - Flip the completion flag
/// - `DELETE /v1/tasks/:id` - Delete a task

use crate::{
    app::{optional_session, AppState},
    error::ApiResult,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use ticklist_shared::{
    auth::middleware::AuthContext,
    models::task::{Task, TaskQuery},
};
use validator::Validate;

/// Raw listing parameters as they arrive on the query string
///
/// Unrecognized values are not an error; they fall back to `all` / `newest`
/// when converted into a [`TaskQuery`].
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksParams {
    /// Status filter: one of "all", "done", "active"
    pub status: Option<String>,

    /// Sort key: one of "newest", "oldest", "alphabetical"
    pub sort: Option<String>,
}

/// Task list response
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// The caller's tasks, filtered and ordered
    pub tasks: Vec<Task>,

    /// Status filter that was applied (after fallback)
    pub status: String,

    /// Sort key that was applied (after fallback)
    pub sort: String,
}

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task text
    #[validate(length(min = 1, message = "Task content must not be empty"))]
    pub content: String,
}

/// Edit task request
#[derive(Debug, Deserialize, Validate)]
pub struct EditTaskRequest {
    /// Replacement task text
    #[validate(length(min = 1, message = "Task content must not be empty"))]
    pub content: String,
}

/// List the caller's tasks
///
/// Authentication is optional here: without a valid session the response is
/// an empty list, the API equivalent of the logged-out home page. The applied
/// filter and sort are echoed back so a client can render its controls.
pub async fn list_tasks(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListTasksParams>,
) -> ApiResult<Json<TaskListResponse>> {
    let query = TaskQuery::from_params(params.status.as_deref(), params.sort.as_deref());

    let tasks = match optional_session(&state, &headers) {
        Some(auth) => Task::list(&state.db, auth.user_id, query).await?,
        None => Vec::new(),
    };

    Ok(Json(TaskListResponse {
        tasks,
        status: query.status.as_str().to_string(),
        sort: query.sort.as_str().to_string(),
    }))
}

/// Add a task for the authenticated user
///
/// # Errors
///
/// - `422 Unprocessable Entity`: content empty (before or after trimming)
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let task = Task::create(&state.db, auth.user_id, &req.content).await?;

    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Fetch one of the caller's tasks
///
/// # Errors
///
/// - `404 Not Found`: no task with that id is owned by the caller
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = Task::find(&state.db, auth.user_id, task_id).await?;
    Ok(Json(task))
}

/// Replace the content of one of the caller's tasks
///
/// # Errors
///
/// - `404 Not Found`: no task with that id is owned by the caller
/// - `422 Unprocessable Entity`: content empty
pub async fn edit_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
    Json(req): Json<EditTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = Task::edit(&state.db, auth.user_id, task_id, &req.content).await?;

    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task edited");

    Ok(Json(task))
}

/// Flip the completion flag of one of the caller's tasks
///
/// # Errors
///
/// - `404 Not Found`: no task with that id is owned by the caller
pub async fn toggle_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = Task::toggle(&state.db, auth.user_id, task_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        task_id = task.id,
        done = task.done,
        "Task toggled"
    );

    Ok(Json(task))
}

/// Delete one of the caller's tasks
///
/// # Errors
///
/// - `404 Not Found`: no task with that id is owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<i64>,
) -> ApiResult<StatusCode> {
    Task::delete(&state.db, auth.user_id, task_id).await?;

    tracing::info!(user_id = auth.user_id, task_id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}
