use crate::assets::store::AssetStore;
use crate::compile::render_tree::{DrawOp, RenderTree};
use crate::foundation::core::{Affine, Canvas, Rect, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::RectPx;
use crate::layout::taffy_bridge::LayoutTree;
use crate::style::node::{Node, NodeKind};
use crate::style::style::{Length, Style, TransformOp};

/// Opacity below which a subtree is skipped entirely.
const MIN_VISIBLE_OPACITY: f64 = 1.0 / 512.0;

struct Walk<'a> {
    layout: &'a LayoutTree,
    assets: &'a AssetStore,
    ops: Vec<DrawOp>,
}

/// Lower a laid-out node tree into a display list.
///
/// `layout` must come from [`crate::layout::compute_layout`] on the same `root`.
pub fn compile_frame(
    root: &Node,
    layout: &LayoutTree,
    canvas: Canvas,
    assets: &AssetStore,
) -> ReelResult<RenderTree> {
    if layout.len() != root.count() {
        return Err(ReelError::evaluation(format!(
            "layout has {} nodes, tree has {}",
            layout.len(),
            root.count()
        )));
    }
    let mut w = Walk {
        layout,
        assets,
        ops: Vec::new(),
    };
    w.node(root, 0, Affine::IDENTITY)?;
    Ok(RenderTree {
        width: canvas.width,
        height: canvas.height,
        ops: w.ops,
    })
}

impl Walk<'_> {
    /// `idx` is the pre-order index of `node` in the layout.
    fn node(&mut self, node: &Node, idx: usize, parent: Affine) -> ReelResult<()> {
        let style = &node.style;
        if !self.layout.visible[idx] {
            return Ok(());
        }
        if !style.opacity.is_finite() {
            return Err(ReelError::evaluation(format!(
                "node {}: opacity must be finite",
                node.name.as_deref().unwrap_or("<unnamed>")
            )));
        }
        let opacity = style.opacity.clamp(0.0, 1.0);
        if opacity < MIN_VISIBLE_OPACITY {
            return Ok(());
        }

        let r = self.layout.rects[idx];
        let transform =
            parent * Affine::translate((f64::from(r.x), f64::from(r.y))) * local_transform(style, r);
        let bounds = Rect::new(0.0, 0.0, f64::from(r.w), f64::from(r.h));

        let grouped = opacity < 1.0;
        if grouped {
            self.ops.push(DrawOp::PushOpacity {
                opacity: opacity as f32,
            });
        }

        let has_area = bounds.width() > 0.0 && bounds.height() > 0.0;
        let radius = style.radius.max(0.0).min(bounds.width().min(bounds.height()) / 2.0);
        if has_area {
            if let Some(shadow) = style.shadow
                && shadow.color.a > 0
            {
                self.ops.push(DrawOp::Shadow {
                    transform,
                    rect: bounds,
                    radius,
                    shadow,
                });
            }
            if let Some(paint) = &style.background
                && paint.as_solid().is_none_or(|c| c.a > 0)
            {
                self.ops.push(DrawOp::Fill {
                    transform,
                    rect: bounds,
                    radius,
                    paint: paint.clone(),
                });
            }
            if let Some(border) = style.border
                && border.width > 0.0
                && border.color.a > 0
            {
                self.ops.push(DrawOp::Border {
                    transform,
                    rect: bounds,
                    radius,
                    width: border.width,
                    color: border.color,
                });
            }
        }

        match &node.kind {
            NodeKind::Container => {}
            NodeKind::Text { text_style, .. } => {
                if let Some(shaped) = &self.layout.text[idx]
                    && !shaped.runs.is_empty()
                    && text_style.color.a > 0
                {
                    let inset = content_inset(style);
                    self.ops.push(DrawOp::Text {
                        transform,
                        origin: (inset.x, inset.y),
                        color: text_style.color,
                        glyphs: shaped.runs.iter().map(|r| r.glyphs.len()).sum(),
                        runs: shaped.runs.clone(),
                    });
                }
            }
            NodeKind::Image { key } => {
                if let Some(img) = self.assets.image(key) {
                    let content = content_box(style, bounds);
                    let rect = fit_contain(content, f64::from(img.width), f64::from(img.height));
                    if rect.width() > 0.0 && rect.height() > 0.0 {
                        self.ops.push(DrawOp::Image {
                            transform,
                            rect,
                            key: key.clone(),
                        });
                    }
                } else {
                    tracing::trace!(key, "image not loaded; skipped");
                }
            }
        }

        let clipped = style.clip && !node.children.is_empty();
        if clipped {
            self.ops.push(DrawOp::PushClip {
                transform,
                rect: bounds,
                radius,
            });
        }
        let mut child_idx = idx + 1;
        for child in &node.children {
            self.node(child, child_idx, transform)?;
            child_idx += child.count();
        }
        if clipped {
            self.ops.push(DrawOp::Pop);
        }
        if grouped {
            self.ops.push(DrawOp::Pop);
        }
        Ok(())
    }
}

/// CSS transform list around the transform origin, in node-local pixels.
pub(crate) fn local_transform(style: &Style, r: RectPx) -> Affine {
    if style.transform.is_empty() {
        return Affine::IDENTITY;
    }
    let (w, h) = (f64::from(r.w), f64::from(r.h));
    let (ox, oy) = style.transform_origin;
    let origin = Vec2::new(resolve(ox, w), resolve(oy, h));

    let mut m = Affine::IDENTITY;
    for op in &style.transform {
        m = m * match *op {
            TransformOp::Translate { x, y } => Affine::translate((resolve(x, w), resolve(y, h))),
            TransformOp::Scale { x, y } => Affine::scale_non_uniform(x, y),
            TransformOp::Rotate { deg } => Affine::rotate(deg.to_radians()),
        };
    }
    Affine::translate(origin) * m * Affine::translate(-origin)
}

fn resolve(l: Length, reference: f64) -> f64 {
    l.resolve(reference).unwrap_or(0.0)
}

fn content_inset(style: &Style) -> Vec2 {
    let bw = style.border.map(|b| b.width).unwrap_or(0.0);
    Vec2::new(style.padding.left + bw, style.padding.top + bw)
}

fn content_box(style: &Style, bounds: Rect) -> Rect {
    let bw = style.border.map(|b| b.width).unwrap_or(0.0);
    let p = style.padding;
    Rect::new(
        bounds.x0 + p.left + bw,
        bounds.y0 + p.top + bw,
        (bounds.x1 - p.right - bw).max(bounds.x0 + p.left + bw),
        (bounds.y1 - p.bottom - bw).max(bounds.y0 + p.top + bw),
    )
}

/// Largest rectangle with the image's aspect ratio centered in `dst`, like `object-fit: contain`.
pub(crate) fn fit_contain(dst: Rect, img_w: f64, img_h: f64) -> Rect {
    if img_w <= 0.0 || img_h <= 0.0 {
        return Rect::ZERO;
    }
    let s = (dst.width() / img_w).min(dst.height() / img_h);
    let (w, h) = (img_w * s, img_h * s);
    let x0 = dst.x0 + (dst.width() - w) / 2.0;
    let y0 = dst.y0 + (dst.height() - h) / 2.0;
    Rect::new(x0, y0, x0 + w, y0 + h)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
