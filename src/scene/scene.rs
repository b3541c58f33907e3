use std::fmt;

use crate::animation::interpolate::interpolate_clamped;
use crate::animation::spring::{Spring, SpringConfig};
use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::ReelResult;
use crate::foundation::math::responsive;
use crate::style::node::Node;

/// Per-frame inputs available to a scene: the current frame and the video config.
#[derive(Clone, Copy)]
pub struct SceneCtx<'a> {
    /// Frame relative to the start of the enclosing sequence.
    pub frame: FrameIndex,
    /// Composition frame rate.
    pub fps: Fps,
    /// Output canvas.
    pub canvas: Canvas,
    /// Duration of the enclosing sequence in frames.
    pub duration: u64,
    /// Loaded images and fonts.
    pub assets: &'a AssetStore,
}

impl fmt::Debug for SceneCtx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneCtx")
            .field("frame", &self.frame)
            .field("fps", &self.fps)
            .field("canvas", &self.canvas)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl<'a> SceneCtx<'a> {
    /// Same context shifted into a child sequence.
    pub fn local(&self, frame: u64, duration: u64) -> SceneCtx<'a> {
        SceneCtx {
            frame: FrameIndex(frame),
            duration,
            ..*self
        }
    }

    /// Current frame as `f64`.
    pub fn f(&self) -> f64 {
        self.frame.0 as f64
    }

    /// Canvas width as `f64`.
    pub fn w(&self) -> f64 {
        self.canvas.w()
    }

    /// Canvas height as `f64`.
    pub fn h(&self) -> f64 {
        self.canvas.h()
    }

    /// `max(min, round(width * k))`.
    pub fn rw(&self, k: f64, min: f64) -> f64 {
        responsive(self.w(), k, min)
    }

    /// `max(min, round(height * k))`.
    pub fn rh(&self, k: f64, min: f64) -> f64 {
        responsive(self.h(), k, min)
    }

    /// Clamped interpolation of the current frame.
    pub fn interp(&self, input_range: &[f64], output_range: &[f64]) -> ReelResult<f64> {
        interpolate_clamped(self.f(), input_range, output_range)
    }

    /// 0 to 1 spring started `delay` frames into the sequence.
    pub fn spring(&self, delay: f64, config: SpringConfig) -> ReelResult<f64> {
        Spring::new(config).sample(self.f() - delay, self.fps)
    }
}

/// A time-bounded visual composition evaluated once per frame.
///
/// Implementations must be pure: the returned tree depends only on `ctx`.
pub trait Scene: Send + Sync + fmt::Debug {
    /// Stable name used in logs and debug output.
    fn name(&self) -> &str;

    /// Intrinsic duration when the scene defines one (transition series do).
    fn duration(&self, _fps: Fps) -> ReelResult<Option<u64>> {
        Ok(None)
    }

    /// Build the node tree for `ctx.frame`.
    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node>;
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
