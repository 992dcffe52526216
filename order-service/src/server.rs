//! HTTP server lifecycle
//!
//! [`OrderServer::start`] binds the listener and serves on a spawned task.
//! [`OrderServerHandle::stop`] stops accepting connections and lets in-flight
//! requests drain for at most the configured shutdown timeout.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api;
use crate::config::Config;
use crate::state::AppState;

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

pub struct OrderServer;

impl OrderServer {
    /// Bind `config.http_addr()` and start serving
    pub async fn start(config: &Config, state: AppState) -> Result<OrderServerHandle, ServerError> {
        let addr = config.http_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        let app = api::build_app(state, config.request_timeout);
        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
        });

        tracing::info!("Order service listening on {local_addr}");

        Ok(OrderServerHandle {
            local_addr,
            cancel,
            task,
            shutdown_timeout: config.shutdown_timeout,
        })
    }
}

/// Running server
pub struct OrderServerHandle {
    local_addr: SocketAddr,
    cancel: CancellationToken,
    task: JoinHandle<std::io::Result<()>>,
    shutdown_timeout: Duration,
}

impl OrderServerHandle {
    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and drain in-flight requests
    pub async fn stop(self) -> Result<(), ServerError> {
        tracing::info!("Shutting down server...");
        self.cancel.cancel();

        let mut task = self.task;
        match tokio::time::timeout(self.shutdown_timeout, &mut task).await {
            Ok(Ok(result)) => {
                result?;
                tracing::info!("Server shutdown complete");
            }
            Ok(Err(e)) => tracing::error!("Server task failed: {e}"),
            Err(_) => {
                tracing::warn!(
                    "In-flight requests still running after {:?}, aborting",
                    self.shutdown_timeout
                );
                task.abort();
            }
        }
        Ok(())
    }
}

/// Graceful shutdown signal
///
/// Listens for SIGTERM (container stop) and Ctrl+C
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
