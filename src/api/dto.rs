//! Data Transfer Objects for API requests and responses.
//!
//! The same types are used on both ends of the wire: the service
//! deserializes requests and serializes responses, the client sync layer
//! does the reverse.

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::domain::{Todo, TodoId, TodoPatch};

// =============================================================================
// Todo DTOs
// =============================================================================

/// Request DTO for creating a todo.
///
/// `completed` is accepted for compatibility with clients that send it, but
/// a new todo always starts open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl CreateTodoRequest {
    /// Builds the body the client sends for a new todo.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: Some(false),
        }
    }
}

/// Request DTO for updating a todo. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            text: request.text,
            completed: request.completed,
        }
    }
}

/// Response DTO for a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            text: todo.text.clone(),
            completed: todo.completed,
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            text: todo.text,
            completed: todo.completed,
        }
    }
}

impl From<TodoResponse> for Todo {
    fn from(response: TodoResponse) -> Self {
        Self {
            id: TodoId::from(response.id),
            text: response.text,
            completed: response.completed,
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Validates the text of a new todo.
///
/// Returns the text unchanged. Only a missing, `null` or empty value is
/// rejected; surrounding whitespace is the caller's business.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] with the message `"Text is required"`.
pub fn validate_text(text: Option<String>) -> Result<String, ApiError> {
    match text {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ApiError::text_required()),
    }
}

// =============================================================================
// Tests
// =============================================================================
