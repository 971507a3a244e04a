//! Hierarchy module - the MIVES assessment tree.
//!
//! # Components
//!
//! - `HierarchyNode` - Root/Requirement/Criterion/Indicator tree entity
//! - `ValueFunctionParams` - Saturation points and shape constants of an indicator
//! - `ValueFunctionPreset` - Named shape presets (Linear, Convex, Concave, S-Shape)
//! - `SimplifiedIds` - Kind+position identifiers used by CSV interchange

mod function_params;
mod node;
mod simplified_id;

pub use function_params::{ValueFunctionParams, ValueFunctionPreset};
pub use node::{HierarchyNode, PreOrder};
pub use simplified_id::{SimplifiedIds, ROOT_SIMPLIFIED_ID};
