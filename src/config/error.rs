//! Errors raised while loading or checking engine settings.

use thiserror::Error;

/// Failure to produce a usable [`EngineConfig`](super::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Tracing initialization failed: {0}")]
    TracingInit(String),
}

/// A setting that parsed but is out of range.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Vertical fill must be in (0, 1]")]
    InvalidVerticalFill,

    #[error("Node pad must be a non-negative number")]
    InvalidPad,

    #[error("Minimum node weight must be a non-negative number")]
    InvalidMinNodeWeight,

    #[error("Value function cache capacity must be at least 1")]
    InvalidCacheCapacity,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
