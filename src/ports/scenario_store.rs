//! Scenario Store Port - raw indicator inputs for one evaluation.

use std::collections::HashMap;

use crate::domain::foundation::NodeId;
use crate::domain::hierarchy::HierarchyNode;

use super::StoreError;

/// Port for loading and saving the measured values of a scenario.
///
/// The tree is passed in so implementations can translate between stored
/// keys and the tree's `NodeId`s.
///
/// # Contract
///
/// Implementations must:
/// - Ignore stored values whose key matches no indicator of `root`
/// - Only write values for indicators present in `root`
pub trait ScenarioStore: Send + Sync {
    /// Load inputs keyed by the indicators of `root`.
    fn load_values(&self, root: &HierarchyNode) -> Result<HashMap<NodeId, f64>, StoreError>;

    /// Replace stored inputs.
    fn save_values(
        &self,
        root: &HierarchyNode,
        values: &HashMap<NodeId, f64>,
    ) -> Result<(), StoreError>;
}
