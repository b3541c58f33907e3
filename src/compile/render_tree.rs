use serde::Serialize;

use crate::foundation::core::{Affine, Rect};
use crate::layout::text::GlyphRun;
use crate::style::color::Color;
use crate::style::paint::{Paint, Shadow};

/// Flat, backend-agnostic display list for one frame.
///
/// Ops are executed in order; `Push*` ops open a layer that the matching [`DrawOp::Pop`] closes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderTree {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Draw commands in painter's order.
    pub ops: Vec<DrawOp>,
}

/// One display-list command. Geometry is in node-local pixels mapped by `transform`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Start a group composited with `opacity`.
    PushOpacity {
        /// Group alpha in `(0, 1)`.
        opacity: f32,
    },
    /// Start a group clipped to a rounded rectangle.
    PushClip {
        /// Local to canvas transform.
        transform: Affine,
        /// Clip rectangle.
        rect: Rect,
        /// Corner radius.
        radius: f64,
    },
    /// Close the innermost group.
    Pop,
    /// Soft shadow of a rounded rectangle.
    Shadow {
        /// Local to canvas transform.
        transform: Affine,
        /// Shadow-casting rectangle.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Offset, blur and color.
        shadow: Shadow,
    },
    /// Filled rounded rectangle.
    Fill {
        /// Local to canvas transform.
        transform: Affine,
        /// Filled rectangle.
        rect: Rect,
        /// Corner radius.
        radius: f64,
        /// Solid color or gradient over `rect`.
        paint: Paint,
    },
    /// Stroke drawn inside the edge of a rounded rectangle.
    Border {
        /// Local to canvas transform.
        transform: Affine,
        /// Outer edge.
        rect: Rect,
        /// Corner radius of the outer edge.
        radius: f64,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Color,
    },
    /// Image asset drawn into `rect`.
    Image {
        /// Local to canvas transform.
        transform: Affine,
        /// Destination rectangle after fitting.
        rect: Rect,
        /// Asset key.
        key: String,
    },
    /// Shaped glyph runs.
    Text {
        /// Local to canvas transform.
        transform: Affine,
        /// Top-left of the text box.
        origin: (f64, f64),
        /// Glyph color.
        color: Color,
        /// Glyph count, kept for inspection output.
        glyphs: usize,
        /// Runs to draw.
        #[serde(skip)]
        runs: Vec<GlyphRun>,
    },
}

impl RenderTree {
    /// Count ops that draw pixels.
    pub fn draw_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| {
                !matches!(
                    op,
                    DrawOp::PushOpacity { .. } | DrawOp::PushClip { .. } | DrawOp::Pop
                )
            })
            .count()
    }
}
