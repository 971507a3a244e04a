//! HierarchyNode - the Root → Requirement → Criterion → Indicator tree.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, NodeId, NodeKind, Weight};

use super::ValueFunctionParams;

/// A node of a MIVES assessment tree.
///
/// The tree is exclusively owned: every node owns its children, and the whole
/// tree is owned by the caller. Engine services only borrow it.
///
/// # Invariants
/// - Children are always exactly one level below their parent
///   (enforced by [`HierarchyNode::add_child`] and on deserialization).
/// - Only indicators carry value function parameters.
/// - `local_weight` is a percentage of the direct siblings' total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedNode")]
pub struct HierarchyNode {
    id: NodeId,
    kind: NodeKind,
    name: String,
    local_weight: Weight,
    #[serde(skip_serializing_if = "Option::is_none")]
    function: Option<ValueFunctionParams>,
    children: Vec<HierarchyNode>,
}

/// Wire shape of a node before the level rules are checked.
///
/// Children arrive already checked, since each one deserializes through
/// [`HierarchyNode`] again.
#[derive(Deserialize)]
struct UncheckedNode {
    id: NodeId,
    kind: NodeKind,
    name: String,
    local_weight: Weight,
    #[serde(default)]
    function: Option<ValueFunctionParams>,
    #[serde(default)]
    children: Vec<HierarchyNode>,
}

impl TryFrom<UncheckedNode> for HierarchyNode {
    type Error = DomainError;

    fn try_from(raw: UncheckedNode) -> Result<Self, Self::Error> {
        let mut node = Self {
            id: raw.id,
            kind: raw.kind,
            name: raw.name,
            local_weight: raw.local_weight,
            function: None,
            children: Vec::with_capacity(raw.children.len()),
        };
        if let Some(function) = raw.function {
            node.set_function(function)?;
        }
        for child in raw.children {
            node.add_child(child)?;
        }
        Ok(node)
    }
}

impl HierarchyNode {
    fn with_kind(kind: NodeKind, name: impl Into<String>, local_weight: Weight) -> Self {
        Self {
            id: NodeId::new(),
            kind,
            name: name.into(),
            local_weight,
            function: None,
            children: Vec::new(),
        }
    }

    /// Creates a root node. The root always declares 100%.
    pub fn root(name: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Root, name, Weight::HUNDRED)
    }

    /// Creates a requirement node.
    pub fn requirement(name: impl Into<String>, local_weight: Weight) -> Self {
        Self::with_kind(NodeKind::Requirement, name, local_weight)
    }

    /// Creates a criterion node.
    pub fn criterion(name: impl Into<String>, local_weight: Weight) -> Self {
        Self::with_kind(NodeKind::Criterion, name, local_weight)
    }

    /// Creates an indicator node with its value function.
    pub fn indicator(
        name: impl Into<String>,
        local_weight: Weight,
        function: ValueFunctionParams,
    ) -> Self {
        let mut node = Self::with_kind(NodeKind::Indicator, name, local_weight);
        node.function = Some(function);
        node
    }

    /// Creates a node of any kind. Indicators receive default parameters.
    pub fn of_kind(kind: NodeKind, name: impl Into<String>, local_weight: Weight) -> Self {
        match kind {
            NodeKind::Root => Self::root(name),
            NodeKind::Indicator => {
                Self::indicator(name, local_weight, ValueFunctionParams::default())
            }
            _ => Self::with_kind(kind, name, local_weight),
        }
    }

    /// Replaces the generated id, for callers restoring a saved tree.
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_weight(&self) -> Weight {
        self.local_weight
    }

    /// Value function parameters; `None` for every non-indicator node.
    pub fn function(&self) -> Option<&ValueFunctionParams> {
        self.function.as_ref()
    }

    pub fn children(&self) -> &[HierarchyNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Always false: a subtree contains at least its own node.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_weight(&mut self, weight: Weight) {
        self.local_weight = weight;
    }

    /// Replaces the value function of an indicator.
    ///
    /// # Errors
    /// `MissingFunction` if this node is not an indicator.
    pub fn set_function(&mut self, function: ValueFunctionParams) -> Result<(), DomainError> {
        if !self.kind.is_indicator() {
            return Err(DomainError::new(
                ErrorCode::MissingFunction,
                format!("{} nodes do not carry a value function", self.kind),
            )
            .with_detail("node", self.name.clone()));
        }
        self.function = Some(function);
        Ok(())
    }

    /// Appends a child, enforcing the fixed level order.
    ///
    /// # Errors
    /// `InvalidChildKind` if `child` is not exactly one level below this node.
    pub fn add_child(&mut self, child: HierarchyNode) -> Result<&mut HierarchyNode, DomainError> {
        if !self.kind.accepts_child(child.kind) {
            return Err(DomainError::new(
                ErrorCode::InvalidChildKind,
                format!("{} cannot be placed under {}", child.kind, self.kind),
            )
            .with_detail("parent", self.name.clone())
            .with_detail("child", child.name.clone()));
        }
        let index = self.children.len();
        self.children.push(child);
        Ok(&mut self.children[index])
    }

    /// Detaches the descendant with `id` and returns it with its subtree.
    ///
    /// # Errors
    /// `RootNotRemovable` for this node's own id, `NodeNotFound` otherwise.
    pub fn remove_child(&mut self, id: NodeId) -> Result<HierarchyNode, DomainError> {
        if id == self.id {
            return Err(DomainError::new(
                ErrorCode::RootNotRemovable,
                "A node cannot remove itself",
            ));
        }
        self.detach(id).ok_or_else(|| {
            DomainError::new(ErrorCode::NodeNotFound, "Node not found")
                .with_detail("id", id.to_string())
        })
    }

    fn detach(&mut self, id: NodeId) -> Option<HierarchyNode> {
        if let Some(pos) = self.children.iter().position(|c| c.id == id) {
            return Some(self.children.remove(pos));
        }
        self.children.iter_mut().find_map(|child| child.detach(id))
    }

    /// Moves the descendant `id` (with its subtree) under `new_parent`.
    ///
    /// The tree is left untouched when the move is rejected.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), DomainError> {
        let moved_kind = self
            .find(id)
            .map(HierarchyNode::kind)
            .ok_or_else(|| DomainError::new(ErrorCode::NodeNotFound, "Node not found"))?;
        let parent_kind = self
            .find(new_parent)
            .map(HierarchyNode::kind)
            .ok_or_else(|| DomainError::new(ErrorCode::NodeNotFound, "New parent not found"))?;
        if !parent_kind.accepts_child(moved_kind) {
            return Err(DomainError::new(
                ErrorCode::InvalidChildKind,
                format!("{} cannot be placed under {}", moved_kind, parent_kind),
            ));
        }

        let node = self.remove_child(id)?;
        match self.find_mut(new_parent) {
            Some(parent) => parent.add_child(node).map(|_| ()),
            None => Err(DomainError::new(ErrorCode::NodeNotFound, "New parent not found")),
        }
    }

    /// Finds a node in this subtree by id.
    pub fn find(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.iter().find(|node| node.id == id)
    }

    /// Finds a node in this subtree by id, mutably.
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut HierarchyNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Returns the chain of nodes from this node down to `id`, both included.
    pub fn path_to(&self, id: NodeId) -> Option<Vec<&HierarchyNode>> {
        let mut path = Vec::new();
        if self.collect_path(id, &mut path) {
            Some(path)
        } else {
            None
        }
    }

    fn collect_path<'a>(&'a self, id: NodeId, path: &mut Vec<&'a HierarchyNode>) -> bool {
        path.push(self);
        if self.id == id {
            return true;
        }
        for child in &self.children {
            if child.collect_path(id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    /// Depth of `id` below this node (this node = 0).
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        self.path_to(id).map(|path| path.len() - 1)
    }

    /// Iterates the subtree in pre-order (display order).
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Iterates all indicators of the subtree in display order.
    pub fn indicators(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.iter().filter(|node| node.kind.is_indicator())
    }
}

/// Pre-order iterator over a subtree, driven by an explicit stack.
pub struct PreOrder<'a> {
    stack: Vec<&'a HierarchyNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a HierarchyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
