//! Value function parameters attached to indicator nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Shape and saturation parameters of one indicator's value function.
///
/// Field meanings match the function CSV columns
/// `X_Sat_0, X_Sat_1, Units, P, K, C`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueFunctionParams {
    /// Measurement at which satisfaction is 0.
    pub x_sat_0: f64,
    /// Measurement at which satisfaction is 1.
    pub x_sat_1: f64,
    /// Display units of the measurement.
    #[serde(default)]
    pub units: String,
    /// Shape power (P > 0).
    pub p: f64,
    /// Shape rate (K >= 0).
    pub k: f64,
    /// Shape scale (C > 0).
    pub c: f64,
}

impl ValueFunctionParams {
    /// Creates parameters with the given saturation points and shape.
    pub fn new(x_sat_0: f64, x_sat_1: f64, p: f64, k: f64, c: f64) -> Self {
        Self {
            x_sat_0,
            x_sat_1,
            units: String::new(),
            p,
            k,
            c,
        }
    }

    /// Sets the display units.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Returns true when satisfaction grows with the measured value.
    pub fn is_increasing(&self) -> bool {
        self.x_sat_1 > self.x_sat_0
    }

    /// Returns true when both saturation points coincide.
    pub fn is_degenerate(&self) -> bool {
        self.x_sat_0 == self.x_sat_1
    }

    /// Replaces the shape constants with those of a preset.
    ///
    /// Saturation points and units are kept.
    pub fn apply_preset(&mut self, preset: ValueFunctionPreset) {
        let (p, k, c) = preset.shape();
        self.p = p;
        self.k = k;
        self.c = c;
    }

    /// Checks the declared parameter domains.
    ///
    /// Evaluation never fails on out-of-domain values; this check exists for
    /// editors and importers that want to reject them up front.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("x_sat_0", self.x_sat_0),
            ("x_sat_1", self.x_sat_1),
            ("p", self.p),
            ("k", self.k),
            ("c", self.c),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::not_finite(field));
            }
        }
        if self.p <= 0.0 {
            return Err(ValidationError::out_of_range("p", 0.0, f64::MAX, self.p));
        }
        if self.k < 0.0 {
            return Err(ValidationError::out_of_range("k", 0.0, f64::MAX, self.k));
        }
        if self.c <= 0.0 {
            return Err(ValidationError::out_of_range("c", 0.0, f64::MAX, self.c));
        }
        Ok(())
    }
}

impl Default for ValueFunctionParams {
    fn default() -> Self {
        Self::new(0.0, 100.0, 1.0, 0.1, 50.0)
    }
}

/// Named shape presets offered when editing an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFunctionPreset {
    /// `P=1, K=0, C=50`.
    ///
    /// With `K=0` both exponential terms equal 1, so the normalization falls
    /// back to `B=1` and every value strictly inside the saturation range
    /// scores 0.0. Only values at or past `x_sat_1` score 1.0.
    Linear,
    Convex,
    Concave,
    SShape,
}

impl ValueFunctionPreset {
    /// Returns all presets in menu order.
    pub fn all() -> &'static [ValueFunctionPreset] {
        &[
            ValueFunctionPreset::Linear,
            ValueFunctionPreset::Convex,
            ValueFunctionPreset::Concave,
            ValueFunctionPreset::SShape,
        ]
    }

    /// Returns `(P, K, C)` for this preset.
    pub fn shape(&self) -> (f64, f64, f64) {
        match self {
            ValueFunctionPreset::Linear => (1.0, 0.0, 50.0),
            ValueFunctionPreset::Convex => (2.0, 0.5, 50.0),
            ValueFunctionPreset::Concave => (0.5, 0.5, 50.0),
            ValueFunctionPreset::SShape => (3.0, 1.0, 50.0),
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ValueFunctionPreset::Linear => "Linear",
            ValueFunctionPreset::Convex => "Convex",
            ValueFunctionPreset::Concave => "Concave",
            ValueFunctionPreset::SShape => "S-Shape",
        }
    }
}

impl fmt::Display for ValueFunctionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
