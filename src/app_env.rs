use std::env;
use std::str::FromStr;
use thiserror::Error;

/// MongoDB connection string. The path names the database todos are stored in.
pub const MONGODB_URL: &str = "MONGODB_URL";
/// Which store todos are kept in, either "mongodb" or "memory"
pub const TODO_STORE: &str = "TODO_STORE";
/// Socket address the HTTP server listens on
pub const SERVER_ADDRESS: &str = "SERVER_ADDRESS";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017/todo-tdd";
const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{variable} must be one of {expected}, got \"{value}\"")]
    InvalidValue {
        variable: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Where todos are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidValue {
                variable: TODO_STORE,
                expected: "\"mongodb\" or \"memory\"",
                value: s.to_owned(),
            }),
        }
    }
}

/// Settings the service is started with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mongodb_url: String,
    pub store_backend: StoreBackend,
    pub server_address: String,
    pub otel_span_export_url: Option<String>,
    pub otel_metric_export_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            mongodb_url: DEFAULT_MONGODB_URL.to_owned(),
            store_backend: StoreBackend::MongoDb,
            server_address: DEFAULT_SERVER_ADDRESS.to_owned(),
            otel_span_export_url: None,
            otel_metric_export_url: None,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment. Load any .env file before calling this.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| env::var(variable).ok())
    }

    /// Reads configuration through [lookup], which returns the value of an environment variable
    /// if it is set. Unset variables fall back to [AppConfig::default].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let store_backend = match lookup(TODO_STORE) {
            Some(backend) => backend.parse()?,
            None => defaults.store_backend,
        };

        Ok(AppConfig {
            mongodb_url: lookup(MONGODB_URL).unwrap_or(defaults.mongodb_url),
            store_backend,
            server_address: lookup(SERVER_ADDRESS).unwrap_or(defaults.server_address),
            otel_span_export_url: lookup(OTEL_SPAN_EXPORT_URL),
            otel_metric_export_url: lookup(OTEL_METRIC_EXPORT_URL),
        })
    }
}
