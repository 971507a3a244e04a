//! Flow Layout Engine - proportional flow-diagram geometry for a MIVES tree.

use std::collections::HashMap;

use crate::domain::analysis::{weight_fraction, ScoreMap};
use crate::domain::foundation::NodeId;
use crate::domain::hierarchy::HierarchyNode;

use super::allocator::{allocate, Allocation};
use super::geometry::{ColorHint, DualFlowLayout, FlowLayout, FlowLink, FlowNode};
use super::options::LayoutOptions;

/// A tree node flattened for layout, in pre-order.
struct Entry<'a> {
    node: &'a HierarchyNode,
    parent: Option<NodeId>,
    depth: usize,
    /// Absolute weight, floored at `min_node_weight` below the root.
    display_height: f64,
}

/// Turns a weighted (and optionally scored) tree into normalized geometry:
/// one column per depth, bar heights proportional to absolute weight.
///
/// # Example
///
/// ```ignore
/// let engine = FlowLayoutEngine::new(LayoutOptions::default());
/// let structure = engine.single_layer(&root);
/// let scenario = engine.dual_layer(&root, &scores);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlowLayoutEngine {
    options: LayoutOptions,
}

impl FlowLayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Structure diagram: heights show absolute weight only.
    ///
    /// # Edge Cases
    /// - Root-only tree: one node, no links
    /// - Zero-weight nodes keep their slot with the `min_node_weight` sliver
    pub fn single_layer(&self, root: &HierarchyNode) -> FlowLayout {
        let entries = self.flatten(root);
        let slots: Vec<(usize, f64)> = entries
            .iter()
            .map(|entry| (entry.depth, entry.display_height))
            .collect();
        let allocation = allocate(&slots, &self.options);

        let nodes = entries
            .iter()
            .zip(&allocation.placements)
            .map(|(entry, placement)| FlowNode {
                id: entry.node.id(),
                label: self.weight_label(entry),
                depth: entry.depth,
                column_x: placement.column_x,
                row_y: placement.center_y,
                height: placement.height,
                color_hint: ColorHint::Node,
            })
            .collect();
        let links = build_links(&entries, &allocation, ColorHint::Link, |entry| {
            entry.display_height
        });

        tracing::debug!(
            nodes = entries.len(),
            scale = allocation.scale,
            "single-layer layout computed"
        );
        finish(nodes, links, &allocation)
    }

    /// Scenario diagram: a shadow layer at full potential and a filled layer
    /// at `display_height × satisfaction`.
    ///
    /// The global scale comes from the shadow layer and is shared by both.
    /// Each filled bar sits at `shadow_top + (shadow_h - filled_h) / 2`, so it
    /// shares the shadow bar's centre. Missing scores count as 0.
    pub fn dual_layer(&self, root: &HierarchyNode, scores: &ScoreMap) -> DualFlowLayout {
        let entries = self.flatten(root);
        let slots: Vec<(usize, f64)> = entries
            .iter()
            .map(|entry| (entry.depth, entry.display_height))
            .collect();
        let allocation = allocate(&slots, &self.options);
        let satisfaction = |entry: &Entry<'_>| unit(scores.score_of(entry.node.id()));

        let mut shadow_nodes = Vec::with_capacity(entries.len());
        let mut filled_nodes = Vec::with_capacity(entries.len());
        for (entry, placement) in entries.iter().zip(&allocation.placements) {
            let id = entry.node.id();
            let sat = satisfaction(entry);
            let filled_height = placement.height * sat;
            let shadow_top = placement.center_y - placement.height / 2.0;
            let filled_top = shadow_top + (placement.height - filled_height) / 2.0;

            shadow_nodes.push(FlowNode {
                id,
                label: String::new(),
                depth: entry.depth,
                column_x: placement.column_x,
                row_y: placement.center_y,
                height: placement.height,
                color_hint: ColorHint::Shadow,
            });
            filled_nodes.push(FlowNode {
                id,
                label: self.satisfaction_label(entry, sat),
                depth: entry.depth,
                column_x: placement.column_x,
                row_y: filled_top + filled_height / 2.0,
                height: filled_height,
                color_hint: if entry.parent.is_none() {
                    ColorHint::RootHighlight
                } else {
                    ColorHint::Node
                },
            });
        }

        let shadow_links = build_links(&entries, &allocation, ColorHint::Shadow, |entry| {
            entry.display_height
        });
        let filled_links = build_links(&entries, &allocation, ColorHint::Link, |entry| {
            entry.display_height * satisfaction(entry)
        });

        tracing::debug!(
            nodes = entries.len(),
            scale = allocation.scale,
            "dual-layer layout computed"
        );
        DualFlowLayout {
            shadow: finish(shadow_nodes, shadow_links, &allocation),
            filled: finish(filled_nodes, filled_links, &allocation),
        }
    }

    /// Pre-order walk recording depth, parent and floored absolute weight.
    fn flatten<'a>(&self, root: &'a HierarchyNode) -> Vec<Entry<'a>> {
        let floor = self.options.effective_min_height();
        let mut entries = Vec::new();
        let mut stack = vec![(root, None, 0usize, 1.0_f64)];

        while let Some((node, parent, depth, absolute)) = stack.pop() {
            let display_height = if parent.is_none() {
                absolute
            } else {
                absolute.max(floor)
            };
            entries.push(Entry {
                node,
                parent,
                depth,
                display_height,
            });
            for child in node.children().iter().rev() {
                stack.push((
                    child,
                    Some(node.id()),
                    depth + 1,
                    absolute * weight_fraction(child),
                ));
            }
        }

        entries
    }

    fn weight_label(&self, entry: &Entry<'_>) -> String {
        if entry.parent.is_none() || !self.options.show_node_weight {
            entry.node.name().to_string()
        } else {
            format!("{} ({:.0}%)", entry.node.name(), entry.node.local_weight().value())
        }
    }

    fn satisfaction_label(&self, entry: &Entry<'_>, satisfaction: f64) -> String {
        if self.options.show_node_weight {
            format!("{} ({:.2})", entry.node.name(), satisfaction)
        } else {
            entry.node.name().to_string()
        }
    }
}

/// One link per non-root entry, parent to child, stacked per endpoint.
fn build_links<F>(
    entries: &[Entry<'_>],
    allocation: &Allocation,
    color_hint: ColorHint,
    value_of: F,
) -> Vec<FlowLink>
where
    F: Fn(&Entry<'_>) -> f64,
{
    let mut source_cursor: HashMap<NodeId, f64> = HashMap::new();
    let mut target_cursor: HashMap<NodeId, f64> = HashMap::new();

    entries
        .iter()
        .filter_map(|entry| {
            let source_id = entry.parent?;
            let target_id = entry.node.id();
            let value = value_of(entry).max(0.0) * allocation.scale;

            let source_offset = source_cursor.entry(source_id).or_insert(0.0);
            let target_offset = target_cursor.entry(target_id).or_insert(0.0);
            let link = FlowLink {
                source_id,
                target_id,
                value,
                source_offset: *source_offset,
                target_offset: *target_offset,
                color_hint,
            };
            *source_offset += value;
            *target_offset += value;
            Some(link)
        })
        .collect()
}

fn finish(nodes: Vec<FlowNode>, links: Vec<FlowLink>, allocation: &Allocation) -> FlowLayout {
    FlowLayout {
        nodes,
        links,
        scale: allocation.scale,
        gap: allocation.gap,
        margin: allocation.margin,
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
