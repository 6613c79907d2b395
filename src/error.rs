//! Top-level error type for process startup.
//!
//! Request handling has no error path of its own: unmatched routes and methods
//! are answered by the framework. Everything that can fail happens before or
//! around serving, and ends the process with a nonzero exit status.

use std::io;

use crate::config::ConfigError;
use crate::http::ServerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to build async runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
