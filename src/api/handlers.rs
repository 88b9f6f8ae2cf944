//! HTTP handlers for the Todo API.
//!
//! Handlers are generic over the [`TodoRepository`] so tests can route the
//! same code against any store implementation.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest, validate_text};
use super::error::{ApiError, ApiJson};
use crate::domain::{TodoId, TodoPatch};
use crate::infrastructure::{RepositoryError, TodoRepository};

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// The store is constructed once at startup and handed to the router here;
/// every request works against the same handle.
pub struct AppState<Repository: TodoRepository> {
    pub repository: Arc<Repository>,
}

impl<Repository: TodoRepository> AppState<Repository> {
    #[must_use]
    pub fn new(repository: Repository) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[must_use]
    pub const fn from_arc(repository: Arc<Repository>) -> Self {
        Self { repository }
    }
}

impl<Repository: TodoRepository> Clone for AppState<Repository> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn log_miss(operation: &'static str, error: &RepositoryError) {
    tracing::warn!(operation, %error, "Todo request rejected");
}

// =============================================================================
// GET /api/todos
// =============================================================================

/// Lists every todo in insertion order.
pub async fn list_todos<Repository>(
    State(state): State<AppState<Repository>>,
) -> Json<Vec<TodoResponse>>
where
    Repository: TodoRepository,
{
    let todos = state.repository.list().await;
    Json(todos.into_iter().map(TodoResponse::from).collect())
}

// =============================================================================
// GET /api/todos/{id}
// =============================================================================

/// Returns a single todo.
///
/// # Errors
///
/// - **404 Not Found**: no todo has this ID
pub async fn get_todo<Repository>(
    State(state): State<AppState<Repository>>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, ApiError>
where
    Repository: TodoRepository,
{
    let todo = state
        .repository
        .find_by_id(&TodoId::from(id))
        .await
        .inspect_err(|error| log_miss("get", error))?;

    Ok(Json(TodoResponse::from(todo)))
}

// =============================================================================
// POST /api/todos
// =============================================================================

/// Creates a new todo.
///
/// # Request Body
///
/// ```json
/// { "text": "Buy milk" }
/// ```
///
/// # Response
///
/// - **201 Created**: the stored todo, with its new `id` and `completed: false`
///
/// # Errors
///
/// - **400 Bad Request**: `text` missing, `null` or empty, or the body is not
///   valid JSON. The store is left untouched.
pub async fn create_todo<Repository>(
    State(state): State<AppState<Repository>>,
    ApiJson(request): ApiJson<CreateTodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError>
where
    Repository: TodoRepository,
{
    let text = validate_text(request.text).inspect_err(|error| {
        tracing::warn!(%error, "Create rejected");
    })?;

    let todo = state.repository.create(text).await?;
    tracing::info!(id = %todo.id, "Todo created");

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

// =============================================================================
// PUT /api/todos/{id}
// =============================================================================

/// Updates the supplied fields of a todo and returns the merged result.
///
/// # Errors
///
/// - **404 Not Found**: no todo has this ID
/// - **400 Bad Request**: `text` supplied but empty, or malformed body
pub async fn update_todo<Repository>(
    State(state): State<AppState<Repository>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, ApiError>
where
    Repository: TodoRepository,
{
    let patch = TodoPatch::from(request);
    let todo = state
        .repository
        .update(&TodoId::from(id), patch)
        .await
        .inspect_err(|error| log_miss("update", error))?;

    tracing::info!(id = %todo.id, completed = todo.completed, "Todo updated");
    Ok(Json(TodoResponse::from(todo)))
}

// =============================================================================
// DELETE /api/todos/{id}
// =============================================================================

/// Deletes a todo and returns it.
///
/// # Errors
///
/// - **404 Not Found**: no todo has this ID
pub async fn delete_todo<Repository>(
    State(state): State<AppState<Repository>>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, ApiError>
where
    Repository: TodoRepository,
{
    let todo = state
        .repository
        .delete(&TodoId::from(id))
        .await
        .inspect_err(|error| log_miss("delete", error))?;

    tracing::info!(id = %todo.id, "Todo deleted");
    Ok(Json(TodoResponse::from(todo)))
}

// =============================================================================
// GET /health, GET /
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Landing text for anyone pointing a browser at the service root.
pub async fn welcome() -> &'static str {
    "Todo API is running. Todos are served under /api/todos."
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryTodoRepository;
    use rstest::rstest;

    fn state() -> AppState<InMemoryTodoRepository> {
        AppState::new(InMemoryTodoRepository::new())
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_todo_returns_created() {
        let state = state();

        let (status, Json(todo)) = create_todo(
            State(state.clone()),
            ApiJson(CreateTodoRequest::new("Buy milk")),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(todo.text, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(state.repository.len().await, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_todo_ignores_completed_flag() {
        let state = state();
        let request = CreateTodoRequest {
            text: Some("Buy milk".to_string()),
            completed: Some(true),
        };

        let (_, Json(todo)) = create_todo(State(state), ApiJson(request)).await.unwrap();
        assert!(!todo.completed);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_todo_without_text_leaves_store_alone() {
        let state = state();

        let error = create_todo(State(state.clone()), ApiJson(CreateTodoRequest::default()))
            .await
            .unwrap_err();

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert!(state.repository.is_empty().await);
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_todo_unknown_is_not_found() {
        let error = get_todo(State(state()), Path("non-existent-id".to_string()))
            .await
            .unwrap_err();

        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_todo_merges_fields() {
        let state = state();
        let created = state.repository.create("Buy milk".to_string()).await.unwrap();

        let Json(updated) = update_todo(
            State(state),
            Path(created.id.to_string()),
            ApiJson(UpdateTodoRequest {
                text: None,
                completed: Some(true),
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.id, created.id.to_string());
        assert_eq!(updated.text, "Buy milk");
        assert!(updated.completed);
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_todo_returns_deleted() {
        let state = state();
        let created = state.repository.create("Buy milk".to_string()).await.unwrap();

        let Json(deleted) = delete_todo(State(state.clone()), Path(created.id.to_string()))
            .await
            .unwrap();

        assert_eq!(deleted.id, created.id.to_string());
        assert!(state.repository.is_empty().await);
    }

    #[rstest]
    #[tokio::test]
    async fn test_health_check() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
    }
}
