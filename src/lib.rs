//! docker-app: a minimal containerized web service.
//!
//! Serves a welcome message on `/` and a liveness probe on `/health`. The
//! library exposes the router and server so the binary and the integration
//! tests drive the same code.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
