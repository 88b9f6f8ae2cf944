//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
pub use error::{ApiError, ApiJson, ErrorResponse, TEXT_REQUIRED_MESSAGE};
pub use handlers::{
    AppState, HealthResponse, create_todo, delete_todo, get_todo, health_check, list_todos,
    update_todo, welcome,
};
pub use routes::create_router;
