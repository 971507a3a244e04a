//! Scoring configuration

use serde::Deserialize;

use crate::domain::analysis::{TreeAggregator, DEFAULT_CACHE_CAPACITY};

use super::error::ValidationError;

/// Scoring configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Maximum number of memoized value function evaluations
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl ScoringConfig {
    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cache_capacity == 0 {
            return Err(ValidationError::InvalidCacheCapacity);
        }
        Ok(())
    }

    /// Aggregator sized by this configuration
    pub fn aggregator(&self) -> TreeAggregator {
        TreeAggregator::new(self.cache_capacity)
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}
