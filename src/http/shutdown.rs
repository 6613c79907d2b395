//! Graceful shutdown and signal handling.
//!
//! SIGTERM (sent by `docker stop`) and SIGINT both trigger a graceful shutdown
//! with connection draining.

use std::future::Future;
use std::time::Duration;

use axum_server::Handle;

/// Resolves when Ctrl+C is received. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

/// Resolves on the first SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    tokio::select! {
        _ = ctrl_c() => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate() => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Trigger a graceful shutdown of `handle` once `signal` resolves.
///
/// When it fires, the server will:
/// 1. Stop accepting new connections
/// 2. Wait up to `grace` for existing connections to complete
/// 3. Shutdown
pub fn setup_shutdown_handler<F>(handle: Handle, grace: Duration, signal: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        signal.await;

        handle.graceful_shutdown(Some(grace));
        tracing::info!(
            grace_secs = grace.as_secs(),
            "Graceful shutdown initiated, waiting for connections to close"
        );
    });
}
