//! Declarative, CSS-like scene tree: colors, paints, box styles and nodes.

/// Straight-alpha colors and CSS color parsing.
pub mod color;
/// Scene tree nodes.
pub mod node;
/// Fills and box shadows.
pub mod paint;
/// Box, layout and text styles.
#[allow(clippy::module_inception)]
pub mod style;
