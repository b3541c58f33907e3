use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::style::color::Color;
use crate::style::paint::{Border, Paint, Shadow};

/// A length in pixels or as a percentage of the containing block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Length {
    /// Sized by content or by the flex algorithm.
    #[default]
    Auto,
    /// Absolute pixels.
    Px(f64),
    /// Percentage, `100.0` is the full reference size.
    Percent(f64),
}

impl Length {
    /// Resolve against a reference size; `Auto` resolves to `None`.
    pub fn resolve(self, reference: f64) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Px(v) => Some(v),
            Self::Percent(p) => Some(reference * p / 100.0),
        }
    }
}

/// Shorthand for [`Length::Px`].
pub fn px(v: f64) -> Length {
    Length::Px(v)
}

/// Shorthand for [`Length::Percent`].
pub fn pct(v: f64) -> Length {
    Length::Percent(v)
}

/// Per-side pixel values for padding and margin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges {
    /// Top side.
    pub top: f64,
    /// Right side.
    pub right: f64,
    /// Bottom side.
    pub bottom: f64,
    /// Left side.
    pub left: f64,
}

impl Edges {
    /// Same value on every side.
    pub fn all(v: f64) -> Self {
        Self::xy(v, v)
    }

    /// Vertical `y` and horizontal `x`, like CSS `padding: y x`.
    pub fn xy(y: f64, x: f64) -> Self {
        Self {
            top: y,
            right: x,
            bottom: y,
            left: x,
        }
    }
}

/// Offsets of an absolutely positioned box from its container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    /// Offset from the top edge.
    pub top: Length,
    /// Offset from the right edge.
    pub right: Length,
    /// Offset from the bottom edge.
    pub bottom: Length,
    /// Offset from the left edge.
    pub left: Length,
}

impl Insets {
    /// Pin all four edges, like CSS `inset: 0`.
    pub fn fill() -> Self {
        Self::all(0.0)
    }

    /// Same pixel offset from every edge; negative values overscan the parent.
    pub fn all(v: f64) -> Self {
        Self {
            top: px(v),
            right: px(v),
            bottom: px(v),
            left: px(v),
        }
    }

    /// Pin the top-left corner.
    pub fn top_left(top: Length, left: Length) -> Self {
        Self {
            top,
            left,
            ..Self::default()
        }
    }
}

/// Whether a node takes part in layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Display {
    /// Flex container.
    #[default]
    Flex,
    /// Removed from layout and rendering.
    None,
}

/// Positioning scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Laid out by the parent flex container.
    #[default]
    Relative,
    /// Placed by [`Insets`] relative to the parent.
    Absolute,
}

/// Main axis of a flex container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right.
    #[default]
    Row,
    /// Top to bottom.
    Column,
}

/// Main-axis distribution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justify {
    /// Pack at the start.
    #[default]
    Start,
    /// Center.
    Center,
    /// Pack at the end.
    End,
    /// Free space between items.
    SpaceBetween,
}

/// Cross-axis alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Stretch to the container.
    #[default]
    Stretch,
    /// Align to the start.
    Start,
    /// Center.
    Center,
    /// Align to the end.
    End,
    /// Align text baselines.
    Baseline,
}

/// One entry of a CSS-like transform list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOp {
    /// Translation; percentages refer to the node's own size.
    Translate {
        /// Horizontal offset.
        x: Length,
        /// Vertical offset.
        y: Length,
    },
    /// Uniform or per-axis scale.
    Scale {
        /// Horizontal factor.
        x: f64,
        /// Vertical factor.
        y: f64,
    },
    /// Clockwise rotation in degrees.
    Rotate {
        /// Angle in degrees.
        deg: f64,
    },
}

/// Horizontal alignment of text lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Left aligned.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Right aligned.
    End,
}

/// Typography of a text node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f64,
    /// CSS font weight (400 regular, 700 bold).
    pub weight: u16,
    /// Extra advance between glyphs, in pixels.
    pub letter_spacing: f64,
    /// Line height as a multiple of `size`.
    pub line_height: f64,
    /// Fill color.
    pub color: Color,
    /// Line alignment.
    pub align: TextAlign,
    /// Render the text upper-cased.
    pub uppercase: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            weight: 400,
            letter_spacing: 0.0,
            line_height: 1.2,
            color: Color::WHITE,
            align: TextAlign::Start,
            uppercase: false,
        }
    }
}

/// Box style: flex layout, decoration and compositing attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Layout participation.
    pub display: Display,
    /// Positioning scheme.
    pub position: Position,
    /// Edge offsets when absolutely positioned.
    pub inset: Insets,
    /// Flex main axis.
    pub direction: Direction,
    /// Wrap items onto multiple lines.
    pub wrap: bool,
    /// Main-axis distribution.
    pub justify: Justify,
    /// Cross-axis alignment of children.
    pub align_items: Align,
    /// Cross-axis alignment override for this node.
    pub align_self: Option<Align>,
    /// Gap between children in pixels.
    pub gap: f64,
    /// Inner spacing.
    pub padding: Edges,
    /// Outer spacing.
    pub margin: Edges,
    /// Preferred width.
    pub width: Length,
    /// Preferred height.
    pub height: Length,
    /// Minimum width.
    pub min_width: Length,
    /// Minimum height.
    pub min_height: Length,
    /// Maximum width.
    pub max_width: Length,
    /// Maximum height.
    pub max_height: Length,
    /// Flex grow factor.
    pub grow: f64,
    /// Flex shrink factor.
    pub shrink: f64,
    /// Group opacity in `[0, 1]`.
    pub opacity: f64,
    /// Transform list, applied left to right like CSS.
    pub transform: SmallVec<[TransformOp; 4]>,
    /// Transform origin; percentages refer to the node's own size.
    pub transform_origin: (Length, Length),
    /// Background fill.
    pub background: Option<Paint>,
    /// Border stroke.
    pub border: Option<Border>,
    /// Corner radius in pixels.
    pub radius: f64,
    /// Drop shadow.
    pub shadow: Option<Shadow>,
    /// Clip descendants to the (rounded) border box.
    pub clip: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            display: Display::Flex,
            position: Position::Relative,
            inset: Insets::default(),
            direction: Direction::Row,
            wrap: false,
            justify: Justify::Start,
            align_items: Align::Stretch,
            align_self: None,
            gap: 0.0,
            padding: Edges::default(),
            margin: Edges::default(),
            width: Length::Auto,
            height: Length::Auto,
            min_width: Length::Auto,
            min_height: Length::Auto,
            max_width: Length::Auto,
            max_height: Length::Auto,
            grow: 0.0,
            shrink: 1.0,
            opacity: 1.0,
            transform: SmallVec::new(),
            transform_origin: (pct(50.0), pct(50.0)),
            background: None,
            border: None,
            radius: 0.0,
            shadow: None,
            clip: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/style.rs"]
mod tests;
