//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines the
//! constants shared by the rest of the crate: response payload literals,
//! Cache-Control header values, and default paths. `AppConfig` is the root
//! configuration struct; every field has a default so partial files are valid.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use const_format::formatcp;
use serde::Deserialize;

// =============================================================================
// Response Payloads
// =============================================================================

/// Greeting returned by `GET /`
pub const WELCOME_MESSAGE: &str = "Welcome to Flask Docker App";

/// Liveness literal returned by `GET /health`
pub const HEALTH_STATUS_HEALTHY: &str = "healthy";

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// The welcome payload never changes for the life of the process, so upstream
// caches may hold it briefly. Health responses must always reach the process.

/// Welcome page max-age in seconds
pub const HTTP_CACHE_HOME_MAX_AGE: u32 = 60;

pub const CACHE_CONTROL_HOME: &str = formatcp!("public, max-age={}", HTTP_CACHE_HOME_MAX_AGE);

pub const CACHE_CONTROL_HEALTH: &str = "no-store";

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound request id that is reused instead of replaced
pub const MAX_REQUEST_ID_LEN: usize = 128;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path (used only if the file exists)
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port
pub const DEFAULT_PORT: u16 = 5000;

/// Seconds to wait for in-flight requests on shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "docker_app=info,tower_http=info";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads (default: number of CPU cores)
    pub workers: Option<usize>,
    /// Grace period for draining connections on SIGTERM/SIGINT
    pub shutdown_timeout_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: None,
            shutdown_timeout_seconds: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl HttpServerConfig {
    /// Resolve the configured host and port into a bindable address.
    ///
    /// `localhost` is accepted as an alias for the IPv4 loopback address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host.parse().map_err(|e| {
                ConfigError::Validation(format!("Invalid http.host '{}': {}", self.host, e))
            })?
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

/// Values that take priority over the configuration file.
///
/// Populated from command line flags or their environment variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub workers: Option<usize>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or from `DEFAULT_CONFIG_PATH` when it
    /// exists, or fall back to built-in defaults.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply command line / environment overrides, then re-validate.
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<(), ConfigError> {
        if let Some(host) = overrides.host {
            self.http.host = host;
        }
        if let Some(port) = overrides.port {
            self.http.port = port;
        }
        if let Some(workers) = overrides.workers {
            self.http.workers = Some(workers);
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "http.host must not be empty".to_string(),
            ));
        }
        if self.http.workers == Some(0) {
            return Err(ConfigError::Validation(
                "http.workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_bind_all_interfaces_on_5000() {
        let config = AppConfig::default();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.http.workers, None);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(
            config.http.socket_addr().unwrap(),
            "0.0.0.0:5000".parse().unwrap()
        );
    }

    #[test]
    fn cache_control_values() {
        assert_eq!(CACHE_CONTROL_HOME, "public, max-age=60");
        assert_eq!(CACHE_CONTROL_HEALTH, "no-store");
    }

    #[test]
    fn load_full_file() {
        let file = write_config(
            r#"
[http]
host = "127.0.0.1"
port = 8080
workers = 2
shutdown_timeout_seconds = 5

[logging]
format = "json"
"#,
        );
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.workers, Some(2));
        assert_eq!(config.http.shutdown_timeout_seconds, 5);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("[http]\nport = 9000\n");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, DEFAULT_HOST);
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.shutdown_timeout_seconds, DEFAULT_SHUTDOWN_TIMEOUT_SECS);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        let file = write_config("");
        assert_eq!(AppConfig::load(file.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[http]\nprot = 9000\n");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let file = write_config("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let file = write_config("[http]\nworkers = 0\n");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            AppConfig::load_or_default(Some(&missing)),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn overrides_take_priority() {
        let file = write_config("[http]\nhost = \"127.0.0.1\"\nport = 8080\n");
        let mut config = AppConfig::load(file.path()).unwrap();
        config
            .apply_overrides(Overrides {
                host: None,
                port: Some(3000),
                workers: Some(8),
            })
            .unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.http.workers, Some(8));
    }

    #[test]
    fn empty_host_override_is_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(Overrides {
            host: Some("  ".to_string()),
            ..Overrides::default()
        });
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn socket_addr_accepts_localhost_and_ipv6() {
        let mut http = HttpServerConfig {
            host: "localhost".to_string(),
            port: 5000,
            ..HttpServerConfig::default()
        };
        assert_eq!(http.socket_addr().unwrap(), "127.0.0.1:5000".parse().unwrap());

        http.host = "::1".to_string();
        assert_eq!(http.socket_addr().unwrap(), "[::1]:5000".parse().unwrap());
    }

    #[test]
    fn socket_addr_rejects_garbage_host() {
        let http = HttpServerConfig {
            host: "not a host".to_string(),
            ..HttpServerConfig::default()
        };
        assert!(matches!(
            http.socket_addr(),
            Err(ConfigError::Validation(_))
        ));
    }
}
