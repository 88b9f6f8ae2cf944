//! Client-local mirror of the todo list.
//!
//! [`TodoSync`] fetches the full list on load and mirrors each mutation
//! against the service:
//!
//! - add and delete wait for the service to confirm before touching local
//!   state (no optimistic insert or removal)
//! - toggle computes the flipped item locally, sends it, and on success stores
//!   the locally computed value rather than the response body
//! - failures leave local state as it was and overwrite the single shared
//!   error slot; only a successful fetch clears that slot
//!
//! State lives in a `tokio::sync::watch` channel so a renderer can
//! [`subscribe`](TodoSync::subscribe) and observe the loading flag while a
//! fetch is pending. Operations take `&self`; when several are in flight
//! their results are applied in completion order.

use tokio::sync::watch;

use super::transport::{ClientError, TodoApi};
use crate::domain::{Todo, TodoId};

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch todos. Please try again later.";
pub const ADD_ERROR_MESSAGE: &str = "Failed to add todo. Please try again.";
pub const UPDATE_ERROR_MESSAGE: &str = "Failed to update todo. Please try again.";
pub const DELETE_ERROR_MESSAGE: &str = "Failed to delete todo. Please try again.";

// =============================================================================
// Sync State
// =============================================================================

/// Snapshot of everything the client shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    pub todos: Vec<Todo>,
    /// True only while the list fetch is pending.
    pub is_loading: bool,
    /// Message of the most recent failure not yet cleared by a fetch.
    pub error: Option<String>,
}

/// What the list view should show for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoListView<'a> {
    Loading,
    /// An error is set; shown with a retry in place of the list.
    Failed { message: &'a str },
    Empty,
    Items(&'a [Todo]),
}

impl SyncState {
    #[must_use]
    pub fn view(&self) -> TodoListView<'_> {
        if self.is_loading {
            return TodoListView::Loading;
        }
        if let Some(message) = &self.error {
            return TodoListView::Failed { message };
        }
        if self.todos.is_empty() {
            TodoListView::Empty
        } else {
            TodoListView::Items(&self.todos)
        }
    }
}

// =============================================================================
// TodoSync
// =============================================================================

pub struct TodoSync<Api: TodoApi> {
    api: Api,
    state: watch::Sender<SyncState>,
}

impl<Api: TodoApi> TodoSync<Api> {
    /// Creates a sync layer with an empty list. Call
    /// [`fetch_todos`](Self::fetch_todos) to load.
    #[must_use]
    pub fn new(api: Api) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        Self { api, state }
    }

    #[must_use]
    pub fn state(&self) -> SyncState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.state.borrow().todos.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Replaces the local list with the service's.
    ///
    /// On success the error slot is cleared. On failure the list is left as
    /// it was and the fetch error is recorded.
    pub async fn fetch_todos(&self) {
        self.state.send_modify(|state| state.is_loading = true);

        let result = self.api.list_todos().await;

        self.state.send_modify(|state| {
            match result {
                Ok(todos) => {
                    tracing::debug!(count = todos.len(), "Fetched todos");
                    state.todos = todos;
                    state.error = None;
                }
                Err(error) => {
                    tracing::error!(%error, "Error fetching todos");
                    state.error = Some(FETCH_ERROR_MESSAGE.to_string());
                }
            }
            state.is_loading = false;
        });
    }

    /// Re-runs the list fetch; the retry affordance of the list view.
    pub async fn retry(&self) {
        self.fetch_todos().await;
    }

    /// Creates a todo and appends the service's copy once confirmed.
    pub async fn add_todo(&self, text: &str) {
        match self.api.create_todo(text).await {
            Ok(todo) => self.state.send_modify(|state| state.todos.push(todo)),
            Err(error) => self.fail(ADD_ERROR_MESSAGE, "Error adding todo", &error),
        }
    }

    /// Flips `completed` on the todo with this id.
    ///
    /// The flipped item is computed from local state before the request, sent
    /// in full, and stored as computed once the service accepts it. An id
    /// that is not in the local list sends nothing and records the update
    /// error.
    pub async fn toggle_todo(&self, id: &TodoId) {
        let toggled = self
            .state
            .borrow()
            .todos
            .iter()
            .find(|todo| &todo.id == id)
            .map(Todo::toggled);

        let Some(toggled) = toggled else {
            let error = ClientError::Status {
                status: 404,
                message: Some(format!("todo {id} is not in the local list")),
            };
            self.fail(UPDATE_ERROR_MESSAGE, "Error updating todo", &error);
            return;
        };

        match self.api.update_todo(&toggled).await {
            Ok(_) => self.state.send_modify(|state| {
                if let Some(slot) = state.todos.iter_mut().find(|todo| todo.id == toggled.id) {
                    *slot = toggled;
                }
            }),
            Err(error) => self.fail(UPDATE_ERROR_MESSAGE, "Error updating todo", &error),
        }
    }

    /// Deletes a todo and drops it locally once confirmed.
    pub async fn delete_todo(&self, id: &TodoId) {
        match self.api.delete_todo(id).await {
            Ok(_) => self
                .state
                .send_modify(|state| state.todos.retain(|todo| &todo.id != id)),
            Err(error) => self.fail(DELETE_ERROR_MESSAGE, "Error deleting todo", &error),
        }
    }

    /// Dismisses the current error, for a user closing the banner.
    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    fn fail(&self, message: &str, context: &'static str, error: &ClientError) {
        tracing::error!(%error, "{context}");
        self.state
            .send_modify(|state| state.error = Some(message.to_string()));
    }
}

// =============================================================================
// Tests
// =============================================================================
