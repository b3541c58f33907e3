use super::*;
use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::style::node::NodeKind;
use crate::style::style::{TextAlign, TransformOp};

fn render(frame: u64) -> Node {
    let assets = AssetStore::empty();
    let ctx = SceneCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::new(1280, 720).unwrap(),
        duration: 80,
        assets: &assets,
    };
    FinalCta::new(Arc::new(IntroConfig::default()))
        .render(&ctx)
        .unwrap()
}

#[test]
fn fades_in_then_pulses() {
    let n = render(8);
    assert_eq!(n.find("final:stack").unwrap().style.opacity, 0.5);

    let n = render(36);
    let headline = n.find("final:headline").unwrap();
    let TransformOp::Scale { x, .. } = headline.style.transform[0] else {
        panic!("headline must pulse");
    };
    assert!((x - 1.04).abs() < 1e-9);
    match &headline.kind {
        NodeKind::Text { text, text_style } => {
            assert_eq!(text, "Try it now!");
            assert_eq!(text_style.align, TextAlign::Center);
            // max(56, round(1280 * 0.075)) = 96
            assert_eq!(text_style.size, 96.0);
        }
        other => panic!("unexpected {other:?}"),
    }
    let n = render(60);
    let TransformOp::Scale { x, .. } = n.find("final:button").unwrap().style.transform[0] else {
        panic!("button must pulse");
    };
    assert!((x - 1.0).abs() < 1e-9);
}
