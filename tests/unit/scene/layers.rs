use super::*;
use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, FrameIndex};
use crate::timeline::series::TransitionSeries;

#[derive(Debug)]
struct Named(&'static str);

impl Scene for Named {
    fn name(&self) -> &str {
        self.0
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        Ok(Node::row().named(format!("{}@{}", self.0, ctx.frame.0)))
    }
}

fn ctx(assets: &AssetStore, frame: u64) -> SceneCtx<'_> {
    SceneCtx {
        frame: FrameIndex(frame),
        fps: Fps::default(),
        canvas: Canvas::default(),
        duration: 100,
        assets,
    }
}

#[test]
fn layers_render_bottom_to_top_with_shared_frame() {
    let assets = AssetStore::empty();
    let stack = Layers::new("s").layer(Named("back")).layer(Named("front"));
    assert_eq!(stack.len(), 2);
    let node = stack.render(&ctx(&assets, 7)).unwrap();
    let names: Vec<_> = node
        .children
        .iter()
        .map(|c| c.name.clone().unwrap())
        .collect();
    assert_eq!(names, vec!["back@7", "front@7"]);
    assert!(node.style.clip);
}

#[test]
fn duration_is_longest_intrinsic_layer() {
    let fps = Fps::default();
    let series = |d| {
        TransitionSeries::builder("x")
            .sequence("a", d, Named("a"))
            .build(fps)
            .unwrap()
    };
    let stack = Layers::new("s")
        .layer(Named("bg"))
        .layer(series(30))
        .layer(series(45));
    assert_eq!(stack.duration(fps).unwrap(), Some(45));
    assert_eq!(Layers::new("e").layer(Named("bg")).duration(fps).unwrap(), None);
}
