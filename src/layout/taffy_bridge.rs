use taffy::prelude::{AvailableSpace, NodeId, Rect, Size};
use taffy::style::{
    AlignItems, AlignSelf, BoxSizing, Dimension, Display, FlexDirection, FlexWrap,
    JustifyContent, LengthPercentage, LengthPercentageAuto, Position, Style,
};

use crate::assets::store::AssetStore;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::RectPx;
use crate::layout::text::{ShapedText, TextShaper};
use crate::style::node::{Node, NodeKind};
use crate::style::style::{self as st, Length};

#[derive(Debug, Clone, Copy)]
enum LayoutNodeCtx {
    Text { node: usize },
    Image { intrinsic: Size<f32> },
}

/// Laid-out frame: one entry per node of the source tree, in pre-order.
#[derive(Debug, Clone, Default)]
pub struct LayoutTree {
    /// Border box of each node relative to its parent.
    pub rects: Vec<RectPx>,
    /// Shaped text for text leaves.
    pub text: Vec<Option<ShapedText>>,
    /// `false` for nodes inside a `display: none` subtree.
    pub visible: Vec<bool>,
}

impl LayoutTree {
    /// Number of laid-out nodes.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Return `true` when the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

struct Builder<'a> {
    taffy: taffy::TaffyTree<LayoutNodeCtx>,
    flat: Vec<&'a Node>,
    ids: Vec<NodeId>,
    visible: Vec<bool>,
    assets: &'a AssetStore,
}

impl<'a> Builder<'a> {
    fn build(&mut self, node: &'a Node, parent_visible: bool) -> Result<NodeId, taffy::TaffyError> {
        let idx = self.flat.len();
        let visible = parent_visible && node.style.display != st::Display::None;
        self.flat.push(node);
        self.visible.push(visible);
        // Reserve the slot; the real id is written once children exist.
        self.ids.push(NodeId::from(u64::MAX));

        let style = taffy_style(&node.style);
        let nid = match &node.kind {
            NodeKind::Text { .. } => self
                .taffy
                .new_leaf_with_context(style, LayoutNodeCtx::Text { node: idx })?,
            NodeKind::Image { key } => {
                let intrinsic = self
                    .assets
                    .image(key)
                    .map(|img| Size {
                        width: img.width as f32,
                        height: img.height as f32,
                    })
                    .unwrap_or(Size::ZERO);
                self.taffy
                    .new_leaf_with_context(style, LayoutNodeCtx::Image { intrinsic })?
            }
            NodeKind::Container => {
                let mut children = Vec::with_capacity(node.children.len());
                for c in &node.children {
                    children.push(self.build(c, visible)?);
                }
                self.taffy.new_with_children(style, &children)?
            }
        };
        self.ids[idx] = nid;
        Ok(nid)
    }
}

/// Lay out `root` against `canvas`, measuring and shaping text through `shaper`.
#[tracing::instrument(level = "trace", skip_all, fields(nodes = root.count()))]
pub fn compute_layout(
    root: &Node,
    canvas: Canvas,
    assets: &AssetStore,
    shaper: &mut TextShaper,
) -> ReelResult<LayoutTree> {
    let mut b = Builder {
        taffy: taffy::TaffyTree::new(),
        flat: Vec::new(),
        ids: Vec::new(),
        visible: Vec::new(),
        assets,
    };
    let taffy_root = b.build(root, true).map_err(layout_err)?;
    let Builder {
        mut taffy,
        flat,
        ids,
        visible,
        ..
    } = b;

    let available = Size {
        width: AvailableSpace::Definite(canvas.w() as f32),
        height: AvailableSpace::Definite(canvas.h() as f32),
    };
    let mut measure_err: Option<ReelError> = None;
    taffy
        .compute_layout_with_measure(
            taffy_root,
            available,
            |known_dimensions, available_space, _node_id, node_context, _style| {
                let Some(ctx) = node_context else {
                    return Size::ZERO;
                };
                match *ctx {
                    LayoutNodeCtx::Image { intrinsic } => image_size(known_dimensions, intrinsic),
                    LayoutNodeCtx::Text { node } => {
                        let NodeKind::Text { text, text_style } = &flat[node].kind else {
                            return Size::ZERO;
                        };
                        let max_w = known_dimensions.width.or(match available_space.width {
                            AvailableSpace::Definite(w) => Some(w),
                            AvailableSpace::MinContent => Some(0.0),
                            AvailableSpace::MaxContent => None,
                        });
                        match shaper.measure(text, text_style, max_w) {
                            Ok((w, h)) => Size {
                                width: known_dimensions.width.unwrap_or(w.ceil()),
                                height: known_dimensions.height.unwrap_or(h.ceil()),
                            },
                            Err(e) => {
                                measure_err.get_or_insert(e);
                                Size::ZERO
                            }
                        }
                    }
                }
            },
        )
        .map_err(layout_err)?;
    if let Some(e) = measure_err {
        return Err(e);
    }

    let mut out = LayoutTree {
        rects: Vec::with_capacity(flat.len()),
        text: Vec::with_capacity(flat.len()),
        visible,
    };
    for (i, (node, nid)) in flat.iter().zip(&ids).enumerate() {
        let l = taffy.layout(*nid).map_err(layout_err)?;
        let rect = RectPx {
            x: l.location.x,
            y: l.location.y,
            w: l.size.width,
            h: l.size.height,
        };
        let shaped = match &node.kind {
            NodeKind::Text { text, text_style } if out.visible[i] => {
                let pad = node.style.padding;
                let content_w = (rect.w - (pad.left + pad.right) as f32).max(0.0);
                Some(shaper.shape(text, text_style, content_w)?)
            }
            _ => None,
        };
        out.rects.push(rect);
        out.text.push(shaped);
    }
    Ok(out)
}

/// Intrinsic size, scaled to keep the aspect ratio when one side is fixed.
fn image_size(known: Size<Option<f32>>, intrinsic: Size<f32>) -> Size<f32> {
    let aspect = if intrinsic.width > 0.0 {
        intrinsic.height / intrinsic.width
    } else {
        0.0
    };
    match (known.width, known.height) {
        (Some(width), Some(height)) => Size { width, height },
        (Some(width), None) => Size {
            width,
            height: width * aspect,
        },
        (None, Some(height)) if aspect > 0.0 => Size {
            width: height / aspect,
            height,
        },
        (None, Some(height)) => Size { width: 0.0, height },
        (None, None) => intrinsic,
    }
}

fn layout_err(e: taffy::TaffyError) -> ReelError {
    ReelError::evaluation(format!("layout failed: {e}"))
}

fn taffy_style(s: &st::Style) -> Style {
    let display = match s.display {
        st::Display::Flex => Display::Flex,
        st::Display::None => Display::None,
    };
    let position = match s.position {
        st::Position::Relative => Position::Relative,
        st::Position::Absolute => Position::Absolute,
    };
    let flex_direction = match s.direction {
        st::Direction::Row => FlexDirection::Row,
        st::Direction::Column => FlexDirection::Column,
    };
    let flex_wrap = if s.wrap {
        FlexWrap::Wrap
    } else {
        FlexWrap::NoWrap
    };
    let justify_content = match s.justify {
        st::Justify::Start => JustifyContent::FlexStart,
        st::Justify::Center => JustifyContent::Center,
        st::Justify::End => JustifyContent::FlexEnd,
        st::Justify::SpaceBetween => JustifyContent::SpaceBetween,
    };
    let gap = LengthPercentage::length(s.gap.max(0.0) as f32);

    Style {
        display,
        position,
        // Sizes exclude padding and border, as in CSS by default.
        box_sizing: BoxSizing::ContentBox,
        inset: Rect {
            left: inset_len(s.inset.left),
            right: inset_len(s.inset.right),
            top: inset_len(s.inset.top),
            bottom: inset_len(s.inset.bottom),
        },
        flex_direction,
        flex_wrap,
        justify_content: Some(justify_content),
        align_items: Some(align_items(s.align_items)),
        align_self: s.align_self.map(align_items),
        gap: Size {
            width: gap,
            height: gap,
        },
        padding: Rect {
            left: LengthPercentage::length(s.padding.left.max(0.0) as f32),
            right: LengthPercentage::length(s.padding.right.max(0.0) as f32),
            top: LengthPercentage::length(s.padding.top.max(0.0) as f32),
            bottom: LengthPercentage::length(s.padding.bottom.max(0.0) as f32),
        },
        border: Rect {
            left: border_len(s),
            right: border_len(s),
            top: border_len(s),
            bottom: border_len(s),
        },
        margin: Rect {
            left: LengthPercentageAuto::length(s.margin.left as f32),
            right: LengthPercentageAuto::length(s.margin.right as f32),
            top: LengthPercentageAuto::length(s.margin.top as f32),
            bottom: LengthPercentageAuto::length(s.margin.bottom as f32),
        },
        size: Size {
            width: dimension(s.width),
            height: dimension(s.height),
        },
        min_size: Size {
            width: dimension(s.min_width),
            height: dimension(s.min_height),
        },
        max_size: Size {
            width: dimension(s.max_width),
            height: dimension(s.max_height),
        },
        flex_grow: s.grow.max(0.0) as f32,
        flex_shrink: s.shrink.max(0.0) as f32,
        ..Style::default()
    }
}

fn align_items(a: st::Align) -> AlignSelf {
    match a {
        st::Align::Stretch => AlignItems::Stretch,
        st::Align::Start => AlignItems::FlexStart,
        st::Align::Center => AlignItems::Center,
        st::Align::End => AlignItems::FlexEnd,
        st::Align::Baseline => AlignItems::Baseline,
    }
}

fn border_len(s: &st::Style) -> LengthPercentage {
    let w = s.border.map(|b| b.width).unwrap_or(0.0);
    LengthPercentage::length(w.max(0.0) as f32)
}

fn dimension(l: Length) -> Dimension {
    match l {
        Length::Auto => Dimension::auto(),
        Length::Px(v) => Dimension::length(v.max(0.0) as f32),
        Length::Percent(p) => Dimension::percent((p / 100.0).max(0.0) as f32),
    }
}

fn inset_len(l: Length) -> LengthPercentageAuto {
    match l {
        Length::Auto => LengthPercentageAuto::auto(),
        Length::Px(v) => LengthPercentageAuto::length(v as f32),
        Length::Percent(p) => LengthPercentageAuto::percent((p / 100.0) as f32),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/taffy_bridge.rs"]
mod tests;
