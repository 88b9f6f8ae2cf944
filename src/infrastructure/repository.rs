//! Repository trait for the todo store.
//!
//! The store is the single authority over todo identity and mutation. All
//! methods return `Send` futures so handlers generic over the repository can
//! be served by axum.

use std::future::Future;

use thiserror::Error;

use crate::domain::{Todo, TodoId, TodoPatch};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No todo with the given identifier exists.
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// The requested change would break a store invariant.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// =============================================================================
// Todo Repository
// =============================================================================

/// Ordered collection of todos.
///
/// Insertion order is the order returned by [`TodoRepository::list`].
pub trait TodoRepository: Send + Sync {
    /// Returns every todo in insertion order.
    fn list(&self) -> impl Future<Output = Vec<Todo>> + Send;

    /// Finds a todo by its ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no todo has this ID.
    fn find_by_id(&self, id: &TodoId) -> impl Future<Output = Result<Todo, RepositoryError>> + Send;

    /// Appends a new todo with a fresh ID and `completed = false`.
    ///
    /// Returns `Err(RepositoryError::InvalidInput)` if `text` is empty.
    fn create(&self, text: String) -> impl Future<Output = Result<Todo, RepositoryError>> + Send;

    /// Applies `patch` to the todo with the given ID and returns the result.
    ///
    /// The lookup happens before validation: an unknown ID is always
    /// `NotFound`, and an empty replacement text on a known ID is
    /// `InvalidInput` with nothing changed.
    fn update(
        &self,
        id: &TodoId,
        patch: TodoPatch,
    ) -> impl Future<Output = Result<Todo, RepositoryError>> + Send;

    /// Removes the todo with the given ID and returns it.
    fn delete(&self, id: &TodoId) -> impl Future<Output = Result<Todo, RepositoryError>> + Send;

    /// Number of stored todos.
    fn len(&self) -> impl Future<Output = usize> + Send;

    /// Returns true if the store holds no todos.
    fn is_empty(&self) -> impl Future<Output = bool> + Send;
}
