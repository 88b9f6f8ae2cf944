//! Client side of the todo service: HTTP transport and the local sync layer.

pub mod config;
pub mod sync;
pub mod transport;

pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use sync::{
    ADD_ERROR_MESSAGE, DELETE_ERROR_MESSAGE, FETCH_ERROR_MESSAGE, SyncState, TodoListView,
    TodoSync, UPDATE_ERROR_MESSAGE,
};
pub use transport::{ClientError, HttpTodoApi, TodoApi};
