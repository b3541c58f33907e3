//! Asset loading: images, SVG rasterization and fonts.

/// Image, SVG and font decoding.
pub mod decode;
/// Loaded assets keyed by name.
pub mod store;
