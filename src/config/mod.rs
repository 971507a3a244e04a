//! Engine settings read from the process environment.
//!
//! Variables use the `MIVES` prefix with `__` between the section and the key,
//! so `MIVES__LAYOUT__VERTICAL_FILL=0.9` sets `layout.vertical_fill`. A `.env`
//! file is honoured when present.
//!
//! # Example
//!
//! ```no_run
//! use mives_engine::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init_tracing().expect("Failed to install tracing");
//!
//! let aggregator = config.scoring.aggregator();
//! let options = config.layout.options();
//! ```

mod error;
mod layout;
mod logging;
mod scoring;

pub use error::{ConfigError, ValidationError};
pub use layout::LayoutConfig;
pub use logging::LoggingConfig;
pub use scoring::ScoringConfig;

use serde::Deserialize;

/// Root engine configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`EngineConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Flow diagram geometry
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Value function caching
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Reads `.env` (if any) and then the `MIVES__*` variables.
    ///
    /// Unset keys keep their defaults. Examples:
    ///
    /// - `MIVES__LAYOUT__PAD=20` -> `layout.pad = 20`
    /// - `MIVES__SCORING__CACHE_CAPACITY=4096` -> `scoring.cache_capacity = 4096`
    /// - `MIVES__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MIVES")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section in turn.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.layout.validate()?;
        self.scoring.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
