//! HTTP server startup logic.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::Handle;

use crate::config::{AppConfig, ConfigError};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until SIGINT/SIGTERM has been received and in-flight
/// requests have drained.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    start_server_with_shutdown(app, config, shutdown::shutdown_signal()).await
}

/// Start the HTTP server and shut it down gracefully once `signal` resolves.
pub async fn start_server_with_shutdown<F>(
    app: Router,
    config: &AppConfig,
    signal: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.http.socket_addr()?;
    let grace = Duration::from_secs(config.http.shutdown_timeout_seconds);

    // Bind up front so a port conflict is reported as a startup failure
    let listener = std::net::TcpListener::bind(addr)
        .map_err(|source| ServerError::Bind { addr, source })?;
    listener
        .set_nonblocking(true)
        .map_err(|source| ServerError::Bind { addr, source })?;

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone(), grace, signal);

    tracing::info!(%addr, "Starting HTTP server");

    axum_server::from_tcp(listener)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}
