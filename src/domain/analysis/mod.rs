//! Analysis Module - Pure domain services for MIVES scoring.
//!
//! This module contains stateless functions that operate on a borrowed
//! hierarchy to compute satisfaction scores, weights and diagnostics.
//!
//! # Components
//!
//! - `ValueFunction` - Exponential MIVES value function (raw value → [0, 1])
//! - `ValueFunctionCache` - Bounded LRU memoization of value function results
//! - `ValueCurve` - Sampled curve points for plotting collaborators
//! - `TreeAggregator` - Weighted bottom-up scores, absolute weights, contributions
//! - `WeightValidator` - Sibling weights must sum to 100% at each level
//!
//! # Design Philosophy
//!
//! Nothing here mutates the tree or returns an error for numeric degeneracy:
//! every well-typed input produces a finite result.

mod tree_aggregator;
mod value_curve;
mod value_function;
mod weight_validator;

pub use tree_aggregator::{IndicatorContribution, ScoreMap, TreeAggregator};
pub(crate) use tree_aggregator::weight_fraction;
pub use value_curve::{CurvePoint, ValueCurve, CURVE_MARGIN_RATIO, DEFAULT_CURVE_POINTS};
pub use value_function::{
    ValueFunction, ValueFunctionCache, DEFAULT_CACHE_CAPACITY, MIN_SCALE, NORMALIZATION_EPSILON,
};
pub use weight_validator::{Violation, WeightValidator, WEIGHT_SUM_TOLERANCE};
