//! Domain layer containing the MIVES model and scoring logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, weights, node kinds, errors)
//! - `hierarchy` - The Root → Requirement → Criterion → Indicator tree
//! - `analysis` - Value functions, weighted aggregation and weight validation
//! - `layout` - Proportional flow-diagram geometry

pub mod analysis;
pub mod foundation;
pub mod hierarchy;
pub mod layout;
