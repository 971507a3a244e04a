//! NodeKind enum representing the four fixed levels of a MIVES hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The four MIVES tree levels, from the single root down to indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Requirement,
    Criterion,
    Indicator,
}

impl NodeKind {
    /// Returns all kinds in hierarchy order.
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::Root,
            NodeKind::Requirement,
            NodeKind::Criterion,
            NodeKind::Indicator,
        ]
    }

    /// Returns the depth at which nodes of this kind live (root = 0).
    pub fn level(&self) -> usize {
        match self {
            NodeKind::Root => 0,
            NodeKind::Requirement => 1,
            NodeKind::Criterion => 2,
            NodeKind::Indicator => 3,
        }
    }

    /// Returns the only kind allowed directly below this one, if any.
    pub fn child_kind(&self) -> Option<NodeKind> {
        match self {
            NodeKind::Root => Some(NodeKind::Requirement),
            NodeKind::Requirement => Some(NodeKind::Criterion),
            NodeKind::Criterion => Some(NodeKind::Indicator),
            NodeKind::Indicator => None,
        }
    }

    /// Returns true if `child` may be attached directly below this kind.
    pub fn accepts_child(&self, child: NodeKind) -> bool {
        self.child_kind() == Some(child)
    }

    /// Returns true for leaf nodes carrying a value function.
    pub fn is_indicator(&self) -> bool {
        matches!(self, NodeKind::Indicator)
    }

    /// Returns the display name, also used as the `Type` column in CSV files.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Requirement => "Requirement",
            NodeKind::Criterion => "Criterion",
            NodeKind::Indicator => "Indicator",
        }
    }

    /// Returns the simplified-identifier prefix, `None` for the root.
    pub fn id_prefix(&self) -> Option<char> {
        match self {
            NodeKind::Root => None,
            NodeKind::Requirement => Some('R'),
            NodeKind::Criterion => Some('C'),
            NodeKind::Indicator => Some('I'),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for NodeKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NodeKind::all()
            .iter()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format("type", format!("unknown node type '{}'", trimmed))
            })
    }
}
