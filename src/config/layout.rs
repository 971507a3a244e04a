//! Flow diagram configuration

use serde::Deserialize;

use crate::domain::layout::LayoutOptions;

use super::error::ValidationError;

/// Flow diagram configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Share of the diagram height used by nodes
    #[serde(default = "default_vertical_fill")]
    pub vertical_fill: f64,

    /// Gap between stacked nodes, in thousandths of the diagram height
    #[serde(default = "default_pad")]
    pub pad: f64,

    /// Append weights or satisfaction to node labels
    #[serde(default = "default_show_node_weight")]
    pub show_node_weight: bool,

    /// Display floor for zero-weight nodes
    #[serde(default = "default_min_node_weight")]
    pub min_node_weight: f64,
}

impl LayoutConfig {
    /// Validate layout configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.vertical_fill > 0.0 && self.vertical_fill <= 1.0) {
            return Err(ValidationError::InvalidVerticalFill);
        }
        if !self.pad.is_finite() || self.pad < 0.0 {
            return Err(ValidationError::InvalidPad);
        }
        if !self.min_node_weight.is_finite() || self.min_node_weight < 0.0 {
            return Err(ValidationError::InvalidMinNodeWeight);
        }
        Ok(())
    }

    /// Options for [`crate::domain::layout::FlowLayoutEngine`].
    pub fn options(&self) -> LayoutOptions {
        LayoutOptions::from(self)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertical_fill: default_vertical_fill(),
            pad: default_pad(),
            show_node_weight: default_show_node_weight(),
            min_node_weight: default_min_node_weight(),
        }
    }
}

impl From<&LayoutConfig> for LayoutOptions {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            vertical_fill: config.vertical_fill,
            gap: LayoutOptions::gap_from_pad(config.pad),
            show_node_weight: config.show_node_weight,
            min_node_weight: config.min_node_weight,
        }
    }
}

fn default_vertical_fill() -> f64 {
    0.95
}

fn default_pad() -> f64 {
    15.0
}

fn default_show_node_weight() -> bool {
    true
}

fn default_min_node_weight() -> f64 {
    0.001
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults_match_engine_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.options(), LayoutOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pad_converts_to_gap() {
        let config = LayoutConfig {
            pad: 40.0,
            ..Default::default()
        };
        assert!((config.options().gap - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_validation_invalid_vertical_fill() {
        for fill in [0.0, -0.5, 1.01, f64::NAN] {
            let config = LayoutConfig {
                vertical_fill: fill,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ValidationError::InvalidVerticalFill)
            ));
        }
    }

    #[test]
    fn test_validation_invalid_pad_and_floor() {
        let config = LayoutConfig {
            pad: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPad)));

        let config = LayoutConfig {
            min_node_weight: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMinNodeWeight)
        ));
    }
}
