//! DescribeStructureHandler - Query handler for the structure view.
//!
//! Loads the hierarchy and returns its weight diagnostics together with the
//! single-layer flow layout.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::analysis::{TreeAggregator, Violation, WeightValidator};
use crate::domain::foundation::NodeId;
use crate::domain::hierarchy::{HierarchyNode, SimplifiedIds};
use crate::domain::layout::{FlowLayout, FlowLayoutEngine, LayoutOptions};
use crate::ports::{HierarchyStore, StoreError};

/// Query to describe the stored hierarchy.
#[derive(Debug, Clone, Default)]
pub struct DescribeStructureQuery {
    /// Geometry settings for the structure diagram.
    pub layout: LayoutOptions,
}

/// Everything the structure view shows for one tree.
#[derive(Debug, Clone)]
pub struct StructureDescription {
    pub root: HierarchyNode,
    pub simplified_ids: SimplifiedIds,
    /// Levels whose children do not sum to 100%.
    pub violations: Vec<Violation>,
    pub absolute_weights: HashMap<NodeId, f64>,
    pub layout: FlowLayout,
}

/// Result of successful structure query.
pub type DescribeStructureResult = StructureDescription;

/// Handler for describing the stored hierarchy.
pub struct DescribeStructureHandler {
    store: Arc<dyn HierarchyStore>,
}

impl DescribeStructureHandler {
    pub fn new(store: Arc<dyn HierarchyStore>) -> Self {
        Self { store }
    }

    pub fn handle(
        &self,
        query: DescribeStructureQuery,
    ) -> Result<DescribeStructureResult, StoreError> {
        let root = self.store.load()?;

        let violations = WeightValidator::validate(&root);
        for violation in &violations {
            tracing::warn!(node = %violation.node_name, sum = violation.children_sum, "unbalanced weights");
        }

        let absolute_weights = TreeAggregator::absolute_weights(&root);
        let layout = FlowLayoutEngine::new(query.layout).single_layer(&root);
        let simplified_ids = SimplifiedIds::assign(&root);

        Ok(StructureDescription {
            root,
            simplified_ids,
            violations,
            absolute_weights,
            layout,
        })
    }
}
