//! Normalized flow-diagram geometry handed to rendering collaborators.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::NodeId;

/// Semantic colour slot; the renderer maps it to an actual colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorHint {
    /// Regular node bar.
    Node,
    /// Root bar in scenario (filled) diagrams.
    RootHighlight,
    /// Regular link ribbon.
    Link,
    /// Muted background for the full-potential layer.
    Shadow,
}

/// A node rectangle. Coordinates are normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: NodeId,
    pub label: String,
    /// Tree depth (root = 0).
    pub depth: usize,
    pub column_x: f64,
    /// Vertical centre of the bar.
    pub row_y: f64,
    pub height: f64,
    pub color_hint: ColorHint,
}

impl FlowNode {
    /// Upper edge of the bar.
    pub fn top(&self) -> f64 {
        self.row_y - self.height / 2.0
    }

    /// Lower edge of the bar.
    pub fn bottom(&self) -> f64 {
        self.row_y + self.height / 2.0
    }
}

/// A ribbon from a parent bar to a child bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source_id: NodeId,
    pub target_id: NodeId,
    /// Ribbon thickness, in the same units as node heights.
    pub value: f64,
    /// Distance from the source bar's top edge to this ribbon.
    pub source_offset: f64,
    /// Distance from the target bar's top edge to this ribbon.
    pub target_offset: f64,
    pub color_hint: ColorHint,
}

/// One complete diagram layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowLayout {
    /// Nodes in display (pre-order) order.
    pub nodes: Vec<FlowNode>,
    /// Links in display order of their targets.
    pub links: Vec<FlowLink>,
    /// Global scale applied to every height, link value and the gap.
    pub scale: f64,
    /// Effective (scaled) gap between adjacent nodes of a column.
    pub gap: f64,
    /// Top/bottom margin.
    pub margin: f64,
}

impl FlowLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finds the node record for a tree node.
    pub fn node(&self, id: NodeId) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Nodes of one column, top to bottom.
    pub fn column(&self, depth: usize) -> impl Iterator<Item = &FlowNode> {
        self.nodes.iter().filter(move |node| node.depth == depth)
    }

    /// Number of columns (deepest level + 1), 0 when empty.
    pub fn column_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Height used by one column: bars plus gaps between them.
    pub fn column_extent(&self, depth: usize) -> f64 {
        let (count, heights) = self
            .column(depth)
            .fold((0usize, 0.0), |(count, sum), node| (count + 1, sum + node.height));
        heights + self.gap * count.saturating_sub(1) as f64
    }
}

/// Scenario diagram: full-potential shadow plus achieved (filled) layer.
///
/// Both layers share node order, columns and rows, and were scaled by the
/// same factor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DualFlowLayout {
    pub shadow: FlowLayout,
    pub filled: FlowLayout,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(depth: usize, row_y: f64, height: f64) -> FlowNode {
        FlowNode {
            id: NodeId::new(),
            label: String::new(),
            depth,
            column_x: 0.0,
            row_y,
            height,
            color_hint: ColorHint::Node,
        }
    }

    #[test]
    fn node_edges_surround_centre() {
        let n = node(0, 0.5, 0.2);
        assert!((n.top() - 0.4).abs() < 1e-12);
        assert!((n.bottom() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn column_extent_counts_gaps_between_nodes() {
        let layout = FlowLayout {
            nodes: vec![node(0, 0.5, 1.0), node(1, 0.2, 0.3), node(1, 0.6, 0.2)],
            links: Vec::new(),
            scale: 1.0,
            gap: 0.05,
            margin: 0.0,
        };
        assert_eq!(layout.column_count(), 2);
        assert!((layout.column_extent(1) - 0.55).abs() < 1e-12);
        assert!((layout.column_extent(0) - 1.0).abs() < 1e-12);
        assert_eq!(layout.column_extent(5), 0.0);
    }

    #[test]
    fn color_hint_serializes_snake_case() {
        let json = serde_json::to_string(&ColorHint::RootHighlight).unwrap();
        assert_eq!(json, "\"root_highlight\"");
    }
}
