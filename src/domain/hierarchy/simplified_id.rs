//! Simplified textual identifiers (`R01`, `C03`, `I12`) derived from kind and position.
//!
//! These are the keys used by the CSV structure, function and scenario files.
//! They are recomputed from the tree on demand and never stored on nodes.

use std::collections::HashMap;

use crate::domain::foundation::{NodeId, NodeKind};

use super::HierarchyNode;

/// Simplified id of the root node.
pub const ROOT_SIMPLIFIED_ID: &str = "ROOT";

/// Bidirectional map between node ids and simplified ids for one tree snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimplifiedIds {
    by_node: HashMap<NodeId, String>,
    by_label: HashMap<String, NodeId>,
}

impl SimplifiedIds {
    /// Numbers every node in pre-order with one running counter per kind.
    ///
    /// # Example
    /// ```text
    /// ROOT
    /// ├── R01
    /// │   ├── C01
    /// │   │   ├── I01
    /// │   │   └── I02
    /// │   └── C02
    /// │       └── I03
    /// └── R02
    /// ```
    pub fn assign(root: &HierarchyNode) -> Self {
        let mut counters: HashMap<NodeKind, usize> = HashMap::new();
        let mut ids = Self::default();

        for node in root.iter() {
            let label = match node.kind().id_prefix() {
                None => ROOT_SIMPLIFIED_ID.to_string(),
                Some(prefix) => {
                    let counter = counters.entry(node.kind()).or_insert(0);
                    *counter += 1;
                    format!("{}{:02}", prefix, counter)
                }
            };
            ids.by_label.insert(label.clone(), node.id());
            ids.by_node.insert(node.id(), label);
        }

        ids
    }

    /// Wraps labels read from a file, which need not follow [`Self::assign`]'s numbering.
    pub fn from_labels(labels: HashMap<String, NodeId>) -> Self {
        let by_node = labels
            .iter()
            .map(|(label, id)| (*id, label.clone()))
            .collect();
        Self {
            by_node,
            by_label: labels,
        }
    }

    /// Returns the simplified id of a node.
    pub fn label_of(&self, id: NodeId) -> Option<&str> {
        self.by_node.get(&id).map(String::as_str)
    }

    /// Resolves a simplified id back to the node id.
    pub fn node_of(&self, label: &str) -> Option<NodeId> {
        self.by_label.get(label.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}
