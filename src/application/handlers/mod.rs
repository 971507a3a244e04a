//! Application handlers.
//!
//! Query handlers that load an assessment through the ports and run the
//! domain services over it.

mod describe_structure;
mod evaluate_scenario;

pub use describe_structure::{
    DescribeStructureHandler, DescribeStructureQuery, DescribeStructureResult,
    StructureDescription,
};
pub use evaluate_scenario::{
    EvaluateScenarioHandler, EvaluateScenarioQuery, EvaluateScenarioResult, ScenarioEvaluation,
};
