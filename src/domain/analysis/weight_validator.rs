//! Weight Validator - sibling weights must sum to 100% at every level.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::NodeId;
use crate::domain::hierarchy::HierarchyNode;

/// Allowed deviation from 100% before a level is reported.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.1;

/// A node whose direct children's weights do not sum to 100%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub node_id: NodeId,
    pub node_name: String,
    /// Observed sum of the children's local weights, in percent.
    pub children_sum: f64,
}

impl Violation {
    /// Signed deviation from 100%.
    pub fn deviation(&self) -> f64 {
        self.children_sum - 100.0
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: Children sum to {}%", self.node_name, self.children_sum)
    }
}

/// Checks the percentage semantics the aggregator relies on.
pub struct WeightValidator;

impl WeightValidator {
    /// Reports every internal node whose children do not sum to 100 ± 0.1.
    ///
    /// # Edge Cases
    /// - Leaves are never checked
    /// - Violations at different levels are all reported, in display order
    pub fn validate(root: &HierarchyNode) -> Vec<Violation> {
        let violations: Vec<Violation> = root
            .iter()
            .filter(|node| !node.is_leaf())
            .filter_map(|node| {
                let children_sum: f64 = node
                    .children()
                    .iter()
                    .map(|child| child.local_weight().value())
                    .sum();
                ((children_sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE).then(|| Violation {
                    node_id: node.id(),
                    node_name: node.name().to_string(),
                    children_sum,
                })
            })
            .collect();

        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "weight violations found");
        }
        violations
    }

    /// Returns true if every level sums to 100%.
    pub fn is_balanced(root: &HierarchyNode) -> bool {
        Self::validate(root).is_empty()
    }
}
