//! # todo-sync
//!
//! An in-memory todo list served over a small JSON REST API, together with
//! a client that mirrors the list locally.
//!
//! - [`api`]: axum router, handlers and wire types for `/api/todos`
//! - [`domain`]: the `Todo` entity and partial updates
//! - [`infrastructure`]: the repository trait, its in-memory store and
//!   server configuration
//! - [`server`]: binding and graceful shutdown
//! - [`client`]: `reqwest` transport and the `TodoSync` state holder

#![forbid(unsafe_code)]

pub mod api;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod server;
