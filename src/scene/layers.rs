use std::sync::Arc;

use crate::foundation::core::Fps;
use crate::foundation::error::ReelResult;
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::node::Node;

/// Scenes stacked on top of each other, all seeing the same frame.
///
/// The stack lasts as long as its longest layer with an intrinsic duration.
#[derive(Clone, Debug)]
pub struct Layers {
    name: String,
    layers: Vec<Arc<dyn Scene>>,
}

impl Layers {
    /// Empty stack.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: Vec::new(),
        }
    }

    /// Add a layer above the existing ones.
    pub fn layer(mut self, scene: impl Scene + 'static) -> Self {
        self.layers.push(Arc::new(scene));
        self
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Return `true` when there are no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Scene for Layers {
    fn name(&self) -> &str {
        &self.name
    }

    fn duration(&self, fps: Fps) -> ReelResult<Option<u64>> {
        let mut out = None;
        for l in &self.layers {
            if let Some(d) = l.duration(fps)? {
                out = Some(out.map_or(d, |o: u64| o.max(d)));
            }
        }
        Ok(out)
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let mut root = Node::fill().named(format!("layers:{}", self.name)).clip();
        for l in &self.layers {
            root = root.child(l.render(ctx)?);
        }
        Ok(root)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layers.rs"]
mod tests;
