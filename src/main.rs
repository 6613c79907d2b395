//! docker-app entry point.
//!
//! Parses command line arguments, loads configuration, initializes tracing,
//! builds the tokio runtime with the configured worker count, and serves the
//! router until SIGTERM/SIGINT.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docker_app::config::{AppConfig, LogFormat, Overrides, DEFAULT_LOG_FILTER};
use docker_app::{create_router, http::start_server, AppError};

/// docker-app: welcome and health endpoints over HTTP
#[derive(Parser, Debug)]
#[command(name = "docker-app", version, about)]
struct Args {
    /// Path to configuration file (default: config/default.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "docker_app=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Address to bind (overrides http.host)
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to bind (overrides http.port)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Tokio worker threads (overrides http.workers)
    #[arg(long, env = "WORKERS")]
    workers: Option<usize>,
}

fn init_tracing(filter: &str, format: LogFormat) -> Result<(), AppError> {
    let registry = tracing_subscriber::registry().with(EnvFilter::new(filter));
    let result = match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };
    result.map_err(|e| AppError::Logging(e.to_string()))
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    config.apply_overrides(Overrides {
        host: args.host,
        port: args.port,
        workers: args.workers,
    })?;

    // Log filter priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, config.logging.format)?;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(workers) = config.http.workers {
        builder.worker_threads(workers);
    }
    let runtime = builder.build().map_err(AppError::Runtime)?;

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        workers = ?config.http.workers,
        shutdown_timeout_secs = config.http.shutdown_timeout_seconds,
        log_format = ?config.logging.format,
        "Loaded configuration"
    );

    runtime.block_on(async {
        let app = create_router();
        start_server(app, &config).await
    })?;

    Ok(())
}
