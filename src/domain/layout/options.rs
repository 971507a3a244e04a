//! Layout options for flow diagrams.

use serde::{Deserialize, Serialize};

/// Smallest vertical fill the allocator will work with.
pub const MIN_VERTICAL_FILL: f64 = 0.01;

/// Geometry knobs for [`super::FlowLayoutEngine`].
///
/// All values are fractions of the normalized diagram height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Share of the height usable by nodes; the rest is split into top/bottom margins.
    pub vertical_fill: f64,
    /// Gap between vertically adjacent nodes before scaling.
    pub gap: f64,
    /// Append weights (single layer) or satisfaction (dual layer) to labels.
    pub show_node_weight: bool,
    /// Floor applied to display heights so zero-weight nodes stay visible.
    pub min_node_weight: f64,
}

impl LayoutOptions {
    /// Converts a pad in thousandths of the diagram height into a gap.
    pub fn gap_from_pad(pad: f64) -> f64 {
        pad / 1000.0
    }

    /// Height available to one column of nodes: `1 - 2 * margin`.
    pub fn available_height(&self) -> f64 {
        if self.vertical_fill.is_nan() {
            return 1.0;
        }
        self.vertical_fill.clamp(MIN_VERTICAL_FILL, 1.0)
    }

    /// Top and bottom margin: `(1 - vertical_fill) / 2`.
    pub fn margin(&self) -> f64 {
        (1.0 - self.available_height()) / 2.0
    }

    pub(crate) fn effective_gap(&self) -> f64 {
        if self.gap.is_finite() {
            self.gap.max(0.0)
        } else {
            0.0
        }
    }

    pub(crate) fn effective_min_height(&self) -> f64 {
        if self.min_node_weight.is_finite() {
            self.min_node_weight.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            vertical_fill: 0.95,
            gap: Self::gap_from_pad(15.0),
            show_node_weight: true,
            min_node_weight: 0.001,
        }
    }
}
