use std::sync::Arc;

use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::color::Color;
use crate::style::node::Node;

/// A renderable video: canvas, frame rate, duration and a root scene.
///
/// Evaluating a frame is a pure function of the composition and the frame index.
#[derive(Clone, Debug)]
pub struct Composition {
    name: String,
    canvas: Canvas,
    fps: Fps,
    duration: u64,
    background: Color,
    root: Arc<dyn Scene>,
    assets: Arc<AssetStore>,
}

impl Composition {
    /// Build and validate a composition.
    ///
    /// When `duration` is `None` the root scene's intrinsic duration is used.
    pub fn new(
        name: impl Into<String>,
        canvas: Canvas,
        fps: Fps,
        duration: Option<u64>,
        root: Arc<dyn Scene>,
        assets: Arc<AssetStore>,
    ) -> ReelResult<Self> {
        let name = name.into();
        let duration = match duration {
            Some(d) => d,
            None => root.duration(fps)?.ok_or_else(|| {
                ReelError::validation(format!(
                    "composition '{name}': scene '{}' has no intrinsic duration",
                    root.name()
                ))
            })?,
        };
        let comp = Self {
            name,
            canvas: Canvas::new(canvas.width, canvas.height)?,
            fps: Fps::new(fps.num, fps.den)?,
            duration,
            background: Color::TRANSPARENT,
            root,
            assets,
        };
        comp.validate()?;
        Ok(comp)
    }

    /// Set the color drawn under every frame.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Check invariants.
    pub fn validate(&self) -> ReelResult<()> {
        if self.duration == 0 {
            return Err(ReelError::validation(format!(
                "composition '{}' must last at least one frame",
                self.name
            )));
        }
        Ok(())
    }

    /// Composition name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Duration in frames.
    pub fn duration_frames(&self) -> u64 {
        self.duration
    }

    /// Color under every frame.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Shared assets.
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Evaluate the node tree for `frame`, wrapped in a canvas-sized root.
    #[tracing::instrument(skip(self), fields(comp = %self.name))]
    pub fn evaluate(&self, frame: FrameIndex) -> ReelResult<Node> {
        if frame.0 >= self.duration {
            return Err(ReelError::evaluation(format!(
                "frame {} is outside composition '{}' ({} frames)",
                frame.0, self.name, self.duration
            )));
        }
        let ctx = SceneCtx {
            frame,
            fps: self.fps,
            canvas: self.canvas,
            duration: self.duration,
            assets: &self.assets,
        };
        let content = self.root.render(&ctx)?;
        Ok(Node::column()
            .named(format!("composition:{}", self.name))
            .size_px(self.canvas.w(), self.canvas.h())
            .bg(self.background)
            .child(content))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/composition.rs"]
mod tests;
