use serde::{Deserialize, Serialize};

use crate::style::color::Color;
use crate::style::paint::{Border, Paint, Shadow};
use crate::style::style::{
    Align, Direction, Display, Edges, Insets, Justify, Length, Position, Style, TextStyle,
    TransformOp, pct, px,
};

/// Content carried by a [`Node`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// Plain box; draws its background and children.
    Container,
    /// Single run of text.
    Text {
        /// Content.
        text: String,
        /// Typography.
        text_style: TextStyle,
    },
    /// Raster or SVG image from the asset store, fitted with `object-fit: contain`.
    Image {
        /// Asset key.
        key: String,
    },
}

/// Element of the declarative scene tree produced for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Optional debug name, surfaced by `inspect`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// What the node draws.
    pub kind: NodeKind,
    /// Layout and decoration.
    #[serde(default)]
    pub style: Style,
    /// Children, painted in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            name: None,
            kind,
            style: Style::default(),
            children: Vec::new(),
        }
    }

    /// Empty container laid out as a row.
    pub fn row() -> Self {
        Self::with_kind(NodeKind::Container)
    }

    /// Empty container laid out as a column.
    pub fn column() -> Self {
        let mut n = Self::row();
        n.style.direction = Direction::Column;
        n
    }

    /// Full-size absolutely positioned layer, like `AbsoluteFill`.
    pub fn fill() -> Self {
        Self::column().absolute(Insets::fill())
    }

    /// Text leaf.
    pub fn text(text: impl Into<String>, text_style: TextStyle) -> Self {
        Self::with_kind(NodeKind::Text {
            text: text.into(),
            text_style,
        })
    }

    /// Image leaf referencing an asset key.
    pub fn image(key: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Image { key: key.into() })
    }

    /// Set the debug name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append children.
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Position absolutely with `inset`.
    pub fn absolute(mut self, inset: Insets) -> Self {
        self.style.position = Position::Absolute;
        self.style.inset = inset;
        self
    }

    /// Hide from layout and rendering.
    pub fn hidden(mut self) -> Self {
        self.style.display = Display::None;
        self
    }

    /// Set width and height.
    pub fn size(mut self, width: Length, height: Length) -> Self {
        self.style.width = width;
        self.style.height = height;
        self
    }

    /// Set a pixel width and height.
    pub fn size_px(self, width: f64, height: f64) -> Self {
        self.size(px(width), px(height))
    }

    /// Fill the parent in both directions.
    pub fn full(self) -> Self {
        self.size(pct(100.0), pct(100.0))
    }

    /// Set width.
    pub fn width(mut self, width: Length) -> Self {
        self.style.width = width;
        self
    }

    /// Set height.
    pub fn height(mut self, height: Length) -> Self {
        self.style.height = height;
        self
    }

    /// Set maximum width.
    pub fn max_width(mut self, width: Length) -> Self {
        self.style.max_width = width;
        self
    }

    /// Set minimum width.
    pub fn min_width(mut self, width: Length) -> Self {
        self.style.min_width = width;
        self
    }

    /// Set the flex grow factor.
    pub fn grow(mut self, grow: f64) -> Self {
        self.style.grow = grow;
        self
    }

    /// Disable flex shrinking.
    pub fn no_shrink(mut self) -> Self {
        self.style.shrink = 0.0;
        self
    }

    /// Set padding.
    pub fn padding(mut self, padding: Edges) -> Self {
        self.style.padding = padding;
        self
    }

    /// Set margin.
    pub fn margin(mut self, margin: Edges) -> Self {
        self.style.margin = margin;
        self
    }

    /// Set the gap between children.
    pub fn gap(mut self, gap: f64) -> Self {
        self.style.gap = gap;
        self
    }

    /// Wrap children onto multiple lines.
    pub fn wrap(mut self) -> Self {
        self.style.wrap = true;
        self
    }

    /// Set main-axis distribution.
    pub fn justify(mut self, justify: Justify) -> Self {
        self.style.justify = justify;
        self
    }

    /// Set cross-axis alignment of children.
    pub fn align(mut self, align: Align) -> Self {
        self.style.align_items = align;
        self
    }

    /// Override this node's own cross-axis alignment.
    pub fn align_self(mut self, align: Align) -> Self {
        self.style.align_self = Some(align);
        self
    }

    /// Center children on both axes.
    pub fn center(self) -> Self {
        self.justify(Justify::Center).align(Align::Center)
    }

    /// Set group opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.style.opacity = opacity;
        self
    }

    /// Append a pixel translation.
    pub fn translate(self, x: f64, y: f64) -> Self {
        self.translate_len(px(x), px(y))
    }

    /// Append a translation that may use percentages of the node size.
    pub fn translate_len(mut self, x: Length, y: Length) -> Self {
        self.style.transform.push(TransformOp::Translate { x, y });
        self
    }

    /// Append a uniform scale.
    pub fn scale(mut self, s: f64) -> Self {
        self.style.transform.push(TransformOp::Scale { x: s, y: s });
        self
    }

    /// Append a clockwise rotation in degrees.
    pub fn rotate(mut self, deg: f64) -> Self {
        self.style.transform.push(TransformOp::Rotate { deg });
        self
    }

    /// Set the transform origin.
    pub fn origin(mut self, x: Length, y: Length) -> Self {
        self.style.transform_origin = (x, y);
        self
    }

    /// Set the background paint.
    pub fn background(mut self, paint: Paint) -> Self {
        self.style.background = Some(paint);
        self
    }

    /// Set a flat background color.
    pub fn bg(self, color: Color) -> Self {
        self.background(Paint::solid(color))
    }

    /// Set the border.
    pub fn border(mut self, width: f64, color: Color) -> Self {
        self.style.border = Some(Border { width, color });
        self
    }

    /// Set the corner radius.
    pub fn radius(mut self, radius: f64) -> Self {
        self.style.radius = radius;
        self
    }

    /// Set the drop shadow.
    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.style.shadow = Some(shadow);
        self
    }

    /// Clip descendants to this node's box.
    pub fn clip(mut self) -> Self {
        self.style.clip = true;
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Depth-first search by debug name.
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/node.rs"]
mod tests;
