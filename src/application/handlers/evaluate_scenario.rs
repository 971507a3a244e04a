//! EvaluateScenarioHandler - Query handler for scenario evaluation.
//!
//! Loads the hierarchy and the scenario inputs, scores the tree, and returns
//! the root index with its breakdown and the dual-layer flow layout.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::analysis::{
    IndicatorContribution, ScoreMap, TreeAggregator, Violation, WeightValidator,
};
use crate::domain::foundation::NodeId;
use crate::domain::hierarchy::HierarchyNode;
use crate::domain::layout::{DualFlowLayout, FlowLayoutEngine, LayoutOptions};
use crate::ports::{HierarchyStore, ScenarioStore, StoreError};

/// Query to evaluate the stored scenario.
#[derive(Debug, Clone, Default)]
pub struct EvaluateScenarioQuery {
    /// Geometry settings for the scenario diagram.
    pub layout: LayoutOptions,
}

/// Scores and geometry for one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioEvaluation {
    pub root: HierarchyNode,
    /// Raw inputs as loaded; indicators without one score at `x_sat_0`.
    pub inputs: HashMap<NodeId, f64>,
    pub scores: ScoreMap,
    /// Satisfaction of the root.
    pub index: f64,
    pub contributions: Vec<IndicatorContribution>,
    pub violations: Vec<Violation>,
    pub layout: DualFlowLayout,
}

/// Result of successful scenario query.
pub type EvaluateScenarioResult = ScenarioEvaluation;

/// Handler for evaluating a scenario against the stored hierarchy.
///
/// Owns the aggregator so value function results stay cached across queries.
pub struct EvaluateScenarioHandler {
    hierarchy: Arc<dyn HierarchyStore>,
    scenario: Arc<dyn ScenarioStore>,
    aggregator: TreeAggregator,
}

impl EvaluateScenarioHandler {
    pub fn new(hierarchy: Arc<dyn HierarchyStore>, scenario: Arc<dyn ScenarioStore>) -> Self {
        Self::with_aggregator(hierarchy, scenario, TreeAggregator::default())
    }

    pub fn with_aggregator(
        hierarchy: Arc<dyn HierarchyStore>,
        scenario: Arc<dyn ScenarioStore>,
        aggregator: TreeAggregator,
    ) -> Self {
        Self {
            hierarchy,
            scenario,
            aggregator,
        }
    }

    pub fn handle(&self, query: EvaluateScenarioQuery) -> Result<EvaluateScenarioResult, StoreError> {
        let root = self.hierarchy.load()?;
        let inputs = self.scenario.load_values(&root)?;

        let violations = WeightValidator::validate(&root);
        if !violations.is_empty() {
            tracing::warn!(count = violations.len(), "scoring a tree with unbalanced weights");
        }

        let scores = self.aggregator.score(&root, &inputs);
        let index = scores.score_of(root.id());
        let contributions = TreeAggregator::contributions(&root, &scores);
        let layout = FlowLayoutEngine::new(query.layout).dual_layer(&root, &scores);

        tracing::info!(index, inputs = inputs.len(), "scenario evaluated");
        Ok(ScenarioEvaluation {
            root,
            inputs,
            scores,
            index,
            contributions,
            violations,
            layout,
        })
    }
}
