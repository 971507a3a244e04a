//! Value Curve - sampled points of an indicator's value function for plotting.

use serde::{Deserialize, Serialize};

use crate::domain::hierarchy::ValueFunctionParams;

use super::ValueFunction;

/// Default number of samples per curve.
pub const DEFAULT_CURVE_POINTS: usize = 100;

/// Fraction of the saturation range added on each side of the plot.
pub const CURVE_MARGIN_RATIO: f64 = 0.1;

/// One sampled point of a value function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub satisfaction: f64,
}

/// Sampling of value functions into plottable point series.
pub struct ValueCurve;

impl ValueCurve {
    /// Returns the plotted x-range: the saturation range widened by 10% per side.
    ///
    /// A degenerate range gets a fixed margin of 1.0.
    pub fn plot_range(params: &ValueFunctionParams) -> (f64, f64) {
        let mut margin = (params.x_sat_1 - params.x_sat_0).abs() * CURVE_MARGIN_RATIO;
        if margin == 0.0 || !margin.is_finite() {
            margin = 1.0;
        }
        let lo = params.x_sat_0.min(params.x_sat_1) - margin;
        let hi = params.x_sat_0.max(params.x_sat_1) + margin;
        (lo, hi)
    }

    /// Samples `points` evenly spaced values across [`ValueCurve::plot_range`].
    ///
    /// # Edge Cases
    /// - `points == 0`: empty series
    /// - `points == 1`: only the lower end of the range
    pub fn sample(params: &ValueFunctionParams, points: usize) -> Vec<CurvePoint> {
        let (lo, hi) = Self::plot_range(params);
        let step = if points > 1 {
            (hi - lo) / (points - 1) as f64
        } else {
            0.0
        };

        (0..points)
            .map(|i| Self::point_at(params, lo + step * i as f64))
            .collect()
    }

    /// Evaluates a single point, e.g. to mark an indicator's actual value.
    pub fn point_at(params: &ValueFunctionParams, x: f64) -> CurvePoint {
        CurvePoint {
            x,
            satisfaction: ValueFunction::evaluate_params(params, x),
        }
    }
}
