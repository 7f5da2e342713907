/// Task model and ownership-scoped database operations
///
/// A task belongs to exactly one user, assigned at creation and never
/// reassigned. Ownership is enforced by carrying the owner's id as a
/// mandatory predicate in every query that touches task rows; there is no
/// fetch-then-check anywhere, so a task id taken from an untrusted request
/// can never reach another user's row. Each mutation re-applies the
/// predicate independently.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     content TEXT NOT NULL,
///     done BOOLEAN NOT NULL DEFAULT FALSE
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use ticklist_shared::models::task::{Task, TaskQuery};
/// use ticklist_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example(owner_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
///
/// let task = Task::create(&pool, owner_id, "buy milk").await?;
/// let task = Task::toggle(&pool, owner_id, task.id).await?;
/// assert!(task.done);
///
/// let tasks = Task::list(&pool, owner_id, TaskQuery::default()).await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Error type for task operations
///
/// Expected domain outcomes are explicit variants; only `Database` represents
/// an unexpected storage failure.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Task content was empty after trimming
    #[error("Task content must not be empty")]
    EmptyContent,

    /// No task with the given id is owned by the acting user.
    ///
    /// "Absent" and "owned by someone else" are deliberately collapsed into
    /// one message so the existence of other users' tasks is never revealed.
    #[error("Task not found, or you do not have permission to modify it")]
    NotFound,

    /// Unexpected storage failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Completion-status filter for task listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// All tasks regardless of completion
    #[default]
    All,

    /// Completed tasks only
    Done,

    /// Not-yet-completed tasks only
    Active,
}

impl StatusFilter {
    /// Parses a request parameter; unrecognized or absent values silently
    /// fall back to `All`.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("done") => StatusFilter::Done,
            Some("active") => StatusFilter::Active,
            _ => StatusFilter::All,
        }
    }

    /// Gets the filter as its request-parameter string
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Done => "done",
            StatusFilter::Active => "active",
        }
    }
}

/// Ordering for task listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recently created first (id descending; ids are monotonic)
    #[default]
    Newest,

    /// Oldest first (id ascending)
    Oldest,

    /// Case-sensitive lexicographic by content, with id ascending as the
    /// tie-break so identical texts order deterministically
    Alphabetical,
}

impl SortKey {
    /// Parses a request parameter; unrecognized or absent values silently
    /// fall back to `Newest`.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("oldest") => SortKey::Oldest,
            Some("alphabetical") => SortKey::Alphabetical,
            _ => SortKey::Newest,
        }
    }

    /// Gets the sort key as its request-parameter string
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Alphabetical => "alphabetical",
        }
    }
}

/// Typed filter/sort parameters for a task listing
///
/// Replaces string-keyed query parameters with the exact recognized values
/// and their fallback behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Completion-status filter
    pub status: StatusFilter,

    /// Ordering
    pub sort: SortKey,
}

impl TaskQuery {
    /// Builds a query from raw request parameters, applying the silent
    /// fallbacks for unrecognized values.
    pub fn from_params(status: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            status: StatusFilter::from_param(status),
            sort: SortKey::from_param(sort),
        }
    }
}

/// Task model representing one to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id (monotonically assigned)
    pub id: i64,

    /// Owning user id; immutable after creation
    pub user_id: i64,

    /// Task text
    pub content: String,

    /// Completion flag
    pub done: bool,
}

impl Task {
    /// Lists the owner's tasks, filtered and ordered
    ///
    /// Only rows with the given `owner_id` are ever considered; the filter
    /// and sort are applied on top of that predicate. Listing for a user with
    /// no tasks returns an empty vector.
    pub async fn list(
        pool: &SqlitePool,
        owner_id: i64,
        query: TaskQuery,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut sql = String::from("SELECT id, user_id, content, done FROM tasks WHERE user_id = ?");

        match query.status {
            StatusFilter::All => {}
            StatusFilter::Done => sql.push_str(" AND done = TRUE"),
            StatusFilter::Active => sql.push_str(" AND done = FALSE"),
        }

        sql.push_str(match query.sort {
            SortKey::Newest => " ORDER BY id DESC",
            SortKey::Oldest => " ORDER BY id ASC",
            SortKey::Alphabetical => " ORDER BY content ASC, id ASC",
        });

        sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Creates a task owned by `owner_id`, not yet done
    ///
    /// # Errors
    ///
    /// Returns `TaskError::EmptyContent` if the content is empty after
    /// trimming.
    pub async fn create(
        pool: &SqlitePool,
        owner_id: i64,
        content: &str,
    ) -> Result<Self, TaskError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(TaskError::EmptyContent);
        }

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, content, done)
            VALUES (?, ?, FALSE)
            RETURNING id, user_id, content, done
            "#,
        )
        .bind(owner_id)
        .bind(content)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Fetches one of the owner's tasks by id (used to pre-fill the edit form)
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NotFound` if no task with that id is owned by
    /// `owner_id`.
    pub async fn find(pool: &SqlitePool, owner_id: i64, task_id: i64) -> Result<Self, TaskError> {
        sqlx::query_as::<_, Task>(
            "SELECT id, user_id, content, done FROM tasks WHERE id = ? AND user_id = ?",
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or(TaskError::NotFound)
    }

    /// Flips the completion flag of one of the owner's tasks
    ///
    /// The flip happens in a single scoped UPDATE, so there is no read-check-
    /// write window and no partial state on failure.
    pub async fn toggle(pool: &SqlitePool, owner_id: i64, task_id: i64) -> Result<Self, TaskError> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET done = NOT done
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, content, done
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or(TaskError::NotFound)
    }

    /// Replaces the content of one of the owner's tasks
    ///
    /// # Errors
    ///
    /// - `TaskError::EmptyContent` if the new content is empty after trimming
    /// - `TaskError::NotFound` if no task with that id is owned by `owner_id`
    pub async fn edit(
        pool: &SqlitePool,
        owner_id: i64,
        task_id: i64,
        new_content: &str,
    ) -> Result<Self, TaskError> {
        let new_content = new_content.trim();
        if new_content.is_empty() {
            return Err(TaskError::EmptyContent);
        }

        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET content = ?
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, content, done
            "#,
        )
        .bind(new_content)
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?
        .ok_or(TaskError::NotFound)
    }

    /// Deletes one of the owner's tasks
    ///
    /// Deletion is immediate and permanent once ownership is confirmed; there
    /// is no soft-delete.
    pub async fn delete(pool: &SqlitePool, owner_id: i64, task_id: i64) -> Result<(), TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_recognized_values() {
        assert_eq!(StatusFilter::from_param(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::from_param(Some("done")), StatusFilter::Done);
        assert_eq!(StatusFilter::from_param(Some("active")), StatusFilter::Active);
    }

    #[test]
    fn test_status_filter_fallback() {
        // Unrecognized and absent values behave as "all", not as an error.
        assert_eq!(StatusFilter::from_param(Some("bogus")), StatusFilter::All);
        assert_eq!(StatusFilter::from_param(Some("DONE")), StatusFilter::All);
        assert_eq!(StatusFilter::from_param(None), StatusFilter::All);
    }

    #[test]
    fn test_sort_key_recognized_values() {
        assert_eq!(SortKey::from_param(Some("newest")), SortKey::Newest);
        assert_eq!(SortKey::from_param(Some("oldest")), SortKey::Oldest);
        assert_eq!(
            SortKey::from_param(Some("alphabetical")),
            SortKey::Alphabetical
        );
    }

    #[test]
    fn test_sort_key_fallback() {
        assert_eq!(SortKey::from_param(Some("bogus")), SortKey::Newest);
        assert_eq!(SortKey::from_param(None), SortKey::Newest);
    }

    #[test]
    fn test_task_query_from_params() {
        let query = TaskQuery::from_params(Some("active"), Some("alphabetical"));
        assert_eq!(query.status, StatusFilter::Active);
        assert_eq!(query.sort, SortKey::Alphabetical);

        let fallback = TaskQuery::from_params(Some("nope"), None);
        assert_eq!(fallback, TaskQuery::default());
    }

    // Database-backed tests are in tests/task_repository_tests.rs
}
