//! HTTP server lifecycle: bind, serve, shut down gracefully.

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

use crate::infrastructure::ServerConfig;

// =============================================================================
// Server
// =============================================================================

pub struct Server {
    config: ServerConfig,
}

impl Server {
    #[must_use]
    pub const fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Serves `router` until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn run(self, router: Router) -> anyhow::Result<()> {
        let address = self.config.socket_addr();
        let listener = TcpListener::bind(&address).await?;

        Self::serve(listener, router).await
    }

    /// Serves `router` on an already bound listener until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails.
    pub async fn serve(listener: TcpListener, router: Router) -> anyhow::Result<()> {
        match listener.local_addr() {
            Ok(address) => tracing::info!("Listening on {}", address),
            Err(error) => tracing::warn!(%error, "Could not determine local address"),
        }

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }
}

// =============================================================================
// Shutdown Signal
// =============================================================================

/// Completes when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_keeps_config() {
        let server = Server::new(ServerConfig::new("127.0.0.1", 8080));

        assert_eq!(server.config().host, "127.0.0.1");
        assert_eq!(server.config().port, 8080);
    }

    #[rstest]
    fn default_config_binds_default_port() {
        let server = Server::new(ServerConfig::default());
        assert_eq!(server.config().socket_addr(), "0.0.0.0:5002");
    }
}
