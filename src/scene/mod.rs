//! Scene trait, per-frame context and top-level compositions.

/// Top-level compositions.
pub mod composition;
/// Scenes stacked on one clock.
pub mod layers;
/// Scene trait and per-frame context.
#[allow(clippy::module_inception)]
pub mod scene;
