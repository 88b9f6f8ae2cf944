//! Domain module for the task list.

pub mod todo;

pub use todo::{Todo, TodoId, TodoPatch};
