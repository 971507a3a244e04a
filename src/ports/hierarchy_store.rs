//! Hierarchy Store Port - persistence for a whole MIVES tree.

use crate::domain::hierarchy::HierarchyNode;

use super::StoreError;

/// Port for loading and saving an assessment tree.
///
/// # Contract
///
/// Implementations must:
/// - Persist structure, local weights and indicator value functions
/// - Return a tree whose parent/child kinds obey Root → Requirement → Criterion → Indicator
/// - Preserve child order across a save → load round trip
///
/// Node identifiers are not part of the contract; a loaded tree may carry
/// fresh `NodeId`s.
pub trait HierarchyStore: Send + Sync {
    /// Load the stored tree.
    ///
    /// # Errors
    ///
    /// - `StoreError::MissingRoot` if no root row exists
    /// - `StoreError::InvalidRow` for rows that cannot become tree nodes
    fn load(&self) -> Result<HierarchyNode, StoreError>;

    /// Replace the stored tree.
    fn save(&self, root: &HierarchyNode) -> Result<(), StoreError>;
}
