//! Todo API server.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (e.g., `debug`, `info`, `todo_sync=debug`)
//! - `HOST`: Server host address (default: `0.0.0.0`)
//! - `PORT`: Server port (default: `5002`)
//! - `SEED_TODOS`: Start with the two sample todos (default: `true`)

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_sync::api::{AppState, create_router};
use todo_sync::infrastructure::{InMemoryTodoRepository, ServerConfig, TodoRepository};
use todo_sync::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_sync=debug,todo_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Todo API");

    let config = ServerConfig::from_env()
        .inspect_err(|error| tracing::error!("Configuration error: {}", error))
        .context("failed to load server configuration")?;

    let repository = if config.seed_todos {
        InMemoryTodoRepository::with_seed_data()
    } else {
        InMemoryTodoRepository::new()
    };

    tracing::info!(
        host = %config.host,
        port = config.port,
        todos = repository.len().await,
        "Todo store initialized"
    );

    let router = create_router(AppState::new(repository));

    Server::new(config).run(router).await
}
