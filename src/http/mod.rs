//! HTTP server module.
//!
//! Serves plain HTTP; TLS termination is left to the container platform or a
//! reverse proxy in front of it.
//!
//! The server includes:
//! - Configurable bind address and worker threads
//! - Graceful shutdown on SIGTERM/SIGINT with connection draining

mod server;
mod shutdown;

pub use server::{start_server, start_server_with_shutdown, ServerError};
