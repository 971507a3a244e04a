//! Layout Module - normalized geometry for proportional flow diagrams.
//!
//! One column per tree depth, bar heights proportional to absolute weight,
//! one global scale so the most crowded column fits. Rendering collaborators
//! map the `[0, 1]` coordinates to pixels.
//!
//! # Components
//!
//! - `FlowLayoutEngine` - single-layer (structure) and dual-layer (scenario) layouts
//! - `LayoutOptions` - fill, gap, label and sliver settings
//! - `FlowLayout`, `FlowNode`, `FlowLink` - the produced geometry

mod allocator;
mod flow_layout;
mod geometry;
mod options;

pub use flow_layout::FlowLayoutEngine;
pub use geometry::{ColorHint, DualFlowLayout, FlowLayout, FlowLink, FlowNode};
pub use options::{LayoutOptions, MIN_VERTICAL_FILL};
