//! In-memory todo repository.
//!
//! Todos live in a `Vec` behind `Arc<RwLock<...>>`. Cloning the repository
//! clones the handle, not the data, so every clone sees the same collection.
//! Each mutation holds the write lock for its entire validate-then-mutate
//! step, which serializes concurrent requests against the store.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Todo, TodoId, TodoPatch};
use crate::infrastructure::{RepositoryError, TodoRepository};

/// Texts of the todos present when the service starts.
pub const SEED_TODO_TEXTS: [&str; 2] = ["Learn Playwright", "Build MERN application"];

/// In-memory implementation of `TodoRepository`.
///
/// Lookups are linear scans; the list is expected to stay demo-sized.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl InMemoryTodoRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the startup seed todos, in order.
    #[must_use]
    pub fn with_seed_data() -> Self {
        let todos = SEED_TODO_TEXTS
            .iter()
            .map(|text| Todo::new(TodoId::generate(), *text))
            .collect();
        Self::from_todos(todos)
    }

    /// Creates a repository from existing todos, keeping their order.
    #[must_use]
    pub fn from_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(todos)),
        }
    }
}

fn not_found(id: &TodoId) -> RepositoryError {
    RepositoryError::NotFound(id.to_string())
}

fn empty_text() -> RepositoryError {
    RepositoryError::InvalidInput("text must not be empty".to_string())
}

impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Todo, RepositoryError> {
        self.todos
            .read()
            .await
            .iter()
            .find(|todo| &todo.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, text: String) -> Result<Todo, RepositoryError> {
        if text.is_empty() {
            return Err(empty_text());
        }

        let todo = Todo::new(TodoId::generate(), text);
        self.todos.write().await.push(todo.clone());

        tracing::debug!(id = %todo.id, "Todo stored");
        Ok(todo)
    }

    async fn update(&self, id: &TodoId, patch: TodoPatch) -> Result<Todo, RepositoryError> {
        let mut guard = self.todos.write().await;
        let todo = guard
            .iter_mut()
            .find(|todo| &todo.id == id)
            .ok_or_else(|| not_found(id))?;

        if patch.text.as_deref().is_some_and(str::is_empty) {
            return Err(empty_text());
        }

        todo.apply(patch);
        Ok(todo.clone())
    }

    async fn delete(&self, id: &TodoId) -> Result<Todo, RepositoryError> {
        let mut guard = self.todos.write().await;
        let index = guard
            .iter()
            .position(|todo| &todo.id == id)
            .ok_or_else(|| not_found(id))?;

        Ok(guard.remove(index))
    }

    async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> InMemoryTodoRepository {
        InMemoryTodoRepository::new()
    }

    fn texts(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|todo| todo.text.as_str()).collect()
    }

    // -------------------------------------------------------------------------
    // Seed Data
    // -------------------------------------------------------------------------

    #[rstest]
    #[tokio::test]
    async fn test_with_seed_data_holds_two_open_todos_in_order() {
        let repository = InMemoryTodoRepository::with_seed_data();
        let todos = repository.list().await;

        assert_eq!(texts(&todos), SEED_TODO_TEXTS.to_vec());
        assert!(todos.iter().all(|todo| !todo.completed));
        assert_ne!(todos[0].id, todos[1].id);
    }

    // -------------------------------------------------------------------------
    // Create / Find
    // -------------------------------------------------------------------------

    #[rstest]
    #[tokio::test]
    async fn test_create_appends_in_insertion_order(repository: InMemoryTodoRepository) {
        for text in ["first", "second", "third"] {
            repository.create(text.to_string()).await.unwrap();
        }

        let todos = repository.list().await;
        assert_eq!(texts(&todos), vec!["first", "second", "third"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_sets_completed_false(repository: InMemoryTodoRepository) {
        let todo = repository.create("Buy milk".to_string()).await.unwrap();
        assert!(!todo.completed);
        assert_eq!(todo.text, "Buy milk");
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_empty_text_is_rejected(repository: InMemoryTodoRepository) {
        let result = repository.create(String::new()).await;

        assert!(matches!(result, Err(RepositoryError::InvalidInput(_))));
        assert!(repository.is_empty().await);
    }

    #[rstest]
    #[tokio::test]
    async fn test_find_by_id_returns_created_todo(repository: InMemoryTodoRepository) {
        let created = repository.create("Buy milk".to_string()).await.unwrap();
        let found = repository.find_by_id(&created.id).await.unwrap();

        assert_eq!(found, created);
    }

    #[rstest]
    #[tokio::test]
    async fn test_find_by_id_unknown(repository: InMemoryTodoRepository) {
        let result = repository.find_by_id(&TodoId::new("non-existent-id")).await;
        assert_eq!(
            result,
            Err(RepositoryError::NotFound("non-existent-id".to_string()))
        );
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    #[rstest]
    #[tokio::test]
    async fn test_update_completed_keeps_text(repository: InMemoryTodoRepository) {
        let created = repository.create("Buy milk".to_string()).await.unwrap();

        let updated = repository
            .update(&created.id, TodoPatch::new().with_completed(true))
            .await
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.text, "Buy milk");
        assert_eq!(repository.find_by_id(&created.id).await.unwrap(), updated);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_text_keeps_completed(repository: InMemoryTodoRepository) {
        let created = repository.create("Buy milk".to_string()).await.unwrap();
        repository
            .update(&created.id, TodoPatch::new().with_completed(true))
            .await
            .unwrap();

        let updated = repository
            .update(&created.id, TodoPatch::new().with_text("Buy oat milk"))
            .await
            .unwrap();

        assert_eq!(updated.text, "Buy oat milk");
        assert!(updated.completed);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_unknown_id_wins_over_invalid_text(repository: InMemoryTodoRepository) {
        let result = repository
            .update(&TodoId::new("missing"), TodoPatch::new().with_text(""))
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_empty_text_changes_nothing(repository: InMemoryTodoRepository) {
        let created = repository.create("Buy milk".to_string()).await.unwrap();

        let result = repository
            .update(
                &created.id,
                TodoPatch::new().with_text("").with_completed(true),
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::InvalidInput(_))));
        assert_eq!(repository.find_by_id(&created.id).await.unwrap(), created);
    }

    // -------------------------------------------------------------------------
    // Delete
    // -------------------------------------------------------------------------

    #[rstest]
    #[tokio::test]
    async fn test_delete_returns_removed_and_keeps_order(repository: InMemoryTodoRepository) {
        let first = repository.create("first".to_string()).await.unwrap();
        let second = repository.create("second".to_string()).await.unwrap();
        let third = repository.create("third".to_string()).await.unwrap();

        let removed = repository.delete(&second.id).await.unwrap();

        assert_eq!(removed, second);
        assert_eq!(repository.list().await, vec![first, third]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_twice_second_is_not_found(repository: InMemoryTodoRepository) {
        let created = repository.create("Buy milk".to_string()).await.unwrap();

        assert!(repository.delete(&created.id).await.is_ok());
        assert!(matches!(
            repository.delete(&created.id).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert_eq!(repository.len().await, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_clones_share_the_collection(repository: InMemoryTodoRepository) {
        let handle = repository.clone();
        handle.create("shared".to_string()).await.unwrap();

        assert_eq!(repository.len().await, 1);
    }
}
