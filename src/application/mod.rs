//! Application layer - Queries and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    DescribeStructureHandler, DescribeStructureQuery, DescribeStructureResult,
    EvaluateScenarioHandler, EvaluateScenarioQuery, EvaluateScenarioResult, ScenarioEvaluation,
    StructureDescription,
};
