//! Tracing subscriber setup.

use tracing::Level;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Environment;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub log_level: String,
    /// Use JSON log format
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            json_logs: true,
        }
    }
}

impl TelemetryConfig {
    /// JSON logs in production, human-readable debug logs elsewhere.
    pub fn for_env(env: Environment) -> Self {
        if env.is_production() {
            Self::default()
        } else {
            Self {
                log_level: "DEBUG".to_string(),
                json_logs: false,
            }
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_uppercase().as_str() {
            "TRACE" => Level::TRACE,
            "DEBUG" => Level::DEBUG,
            "WARN" => Level::WARN,
            "ERROR" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Installs the global tracing subscriber.
///
/// A non-empty `RUST_LOG` replaces the configured level entirely. Fails if a
/// global subscriber is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TryInitError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let registry = tracing_subscriber::registry().with(env_filter(config, &rust_log));

    if config.json_logs {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    }
}

fn env_filter(config: &TelemetryConfig, rust_log: &str) -> EnvFilter {
    if rust_log.trim().is_empty() {
        let level = config.level().as_str().to_ascii_lowercase();
        EnvFilter::new(format!("{level},sqlx::query=warn"))
    } else {
        EnvFilter::new(rust_log)
    }
}
