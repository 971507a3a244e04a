//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::error::{ConfigError, ValidationError};

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.filter().map(|_| ())
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` is not consulted; the configured directive wins.
    ///
    /// # Errors
    ///
    /// Fails if the directive does not parse or a global subscriber is
    /// already installed.
    pub fn init_tracing(&self) -> Result<(), ConfigError> {
        let registry = tracing_subscriber::registry().with(self.filter()?);
        let result = if self.json {
            registry.with(tracing_subscriber::fmt::layer().json()).try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .try_init()
        };
        result.map_err(|err| ConfigError::TracingInit(err.to_string()))
    }

    fn filter(&self) -> Result<EnvFilter, ValidationError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|err| ValidationError::InvalidLogFilter(err.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info,mives_engine=debug".to_string()
}
