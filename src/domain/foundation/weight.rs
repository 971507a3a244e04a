//! Weight value object (percentage of the sibling total, 0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Declared weight of a node relative to its direct siblings.
///
/// Stored as a percentage in `[0, 100]`. Zero is allowed: the node still
/// exists structurally but contributes nothing to its parent's score.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100.0);

    /// Creates a new Weight, clamping to the valid range. NaN becomes zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Creates a Weight, returning error if out of range or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("weight", 0.0, 100.0, value));
        }
        Ok(Self(value))
    }

    /// Parses a display string such as `"50"`, `"50%"` or `" 12.5 % "`.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        if number.is_empty() {
            return Err(ValidationError::empty_field("weight"));
        }
        let value: f64 = number.parse().map_err(|_| {
            ValidationError::invalid_format("weight", format!("'{}' is not a number", trimmed))
        })?;
        Self::try_new(value)
    }

    /// Parses a display string, treating anything malformed as zero weight.
    pub fn parse_lenient(text: &str) -> Self {
        match Self::parse(text) {
            Ok(weight) => weight,
            Err(err) => {
                tracing::warn!(input = text, error = %err, "malformed weight treated as 0%");
                Self::ZERO
            }
        }
    }

    /// Returns the percentage value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for Weight {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_new_accepts_valid_values() {
        assert_eq!(Weight::new(0.0).value(), 0.0);
        assert_eq!(Weight::new(33.5).value(), 33.5);
        assert_eq!(Weight::new(100.0).value(), 100.0);
    }

    #[test]
    fn weight_new_clamps_out_of_range() {
        assert_eq!(Weight::new(120.0).value(), 100.0);
        assert_eq!(Weight::new(-5.0).value(), 0.0);
        assert_eq!(Weight::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn weight_try_new_rejects_out_of_range() {
        match Weight::try_new(101.0) {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "weight");
                assert_eq!(min, 0.0);
                assert_eq!(max, 100.0);
                assert_eq!(actual, 101.0);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
        assert!(Weight::try_new(f64::INFINITY).is_err());
    }

    #[test]
    fn weight_parse_accepts_percent_suffix() {
        assert_eq!(Weight::parse("50%").unwrap().value(), 50.0);
        assert_eq!(Weight::parse("50").unwrap().value(), 50.0);
        assert_eq!(Weight::parse(" 33.33 % ").unwrap().value(), 33.33);
    }

    #[test]
    fn weight_parse_rejects_malformed_input() {
        assert!(matches!(Weight::parse(""), Err(ValidationError::EmptyField { .. })));
        assert!(matches!(Weight::parse("abc"), Err(ValidationError::InvalidFormat { .. })));
        assert!(matches!(Weight::parse("-10%"), Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn weight_parse_lenient_defaults_to_zero() {
        assert_eq!(Weight::parse_lenient("invalid"), Weight::ZERO);
        assert_eq!(Weight::parse_lenient("25%").value(), 25.0);
    }

    #[test]
    fn weight_as_fraction_converts_correctly() {
        assert!((Weight::new(50.0).as_fraction() - 0.5).abs() < f64::EPSILON);
        assert!((Weight::HUNDRED.as_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weight_displays_with_percent_sign() {
        assert_eq!(format!("{}", Weight::new(75.0)), "75%");
        assert_eq!(format!("{}", Weight::new(12.5)), "12.5%");
    }

    #[test]
    fn weight_serializes_as_number() {
        let json = serde_json::to_string(&Weight::new(42.0)).unwrap();
        assert_eq!(json, "42.0");
    }

    #[test]
    fn weight_deserialization_validates_range() {
        let weight: Weight = serde_json::from_str("75").unwrap();
        assert_eq!(weight.value(), 75.0);
        assert!(serde_json::from_str::<Weight>("150").is_err());
    }
}
