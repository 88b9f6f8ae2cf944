//! Infrastructure module.
//!
//! This module contains the todo store and runtime configuration.

pub mod config;
pub mod in_memory;
pub mod repository;

pub use config::{ConfigError, ServerConfig};
pub use in_memory::{InMemoryTodoRepository, SEED_TODO_TEXTS};
pub use repository::{RepositoryError, TodoRepository};
