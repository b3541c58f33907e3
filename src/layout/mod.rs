//! Flex layout (Taffy) and text shaping (Parley).
//!
//! A frame's node tree is converted into a fresh Taffy tree, laid out against the canvas, and
//! flattened back into per-node rectangles in pre-order.

/// Node tree to Taffy conversion and layout.
pub mod taffy_bridge;
pub mod text;

pub use taffy_bridge::{LayoutTree, compute_layout};
pub use text::{ShapedText, TextShaper};

/// Pixel-space rectangle produced by the layout solver, relative to the parent's border box.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct RectPx {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}
