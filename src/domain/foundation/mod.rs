//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of a MIVES assessment.

mod errors;
mod ids;
mod node_kind;
mod weight;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::NodeId;
pub use node_kind::NodeKind;
pub use weight::Weight;
