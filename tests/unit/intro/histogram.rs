use super::*;
use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::style::node::NodeKind;
use crate::style::style::TransformOp;

fn ctx(assets: &AssetStore, frame: u64) -> SceneCtx<'_> {
    SceneCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::new(1920, 1080).unwrap(),
        duration: 150,
        assets,
    }
}

fn scene() -> Histogram {
    Histogram::new(Arc::new(IntroConfig::default()))
}

fn render(frame: u64) -> Node {
    let assets = AssetStore::empty();
    scene().render(&ctx(&assets, frame)).unwrap()
}

fn text_of(n: &Node) -> &str {
    match &n.kind {
        NodeKind::Text { text, .. } => text,
        other => panic!("not a text node: {other:?}"),
    }
}

#[test]
fn cursor_walks_across_bars() {
    let assets = AssetStore::empty();
    let s = scene();
    assert_eq!(s.cursor(&ctx(&assets, 0)).unwrap(), 0);
    assert_eq!(s.cursor(&ctx(&assets, 69)).unwrap(), 5);
    assert_eq!(s.cursor(&ctx(&assets, 120)).unwrap(), 11);
    assert_eq!(s.cursor(&ctx(&assets, 149)).unwrap(), 11);
}

#[test]
fn bars_start_as_slivers() {
    let n = render(0);
    for i in 0..12 {
        let body = n.find(&format!("bar:{i}:body")).unwrap();
        assert_eq!(body.style.height, px(2.0));
    }
    assert_eq!(n.find("histogram:chart").unwrap().style.opacity, 0.0);
}

#[test]
fn active_bar_pulses_and_carries_price() {
    let n = render(54);
    let bar = n.find("bar:3").unwrap();
    let TransformOp::Scale { x, .. } = bar.style.transform[0] else {
        panic!("active bar must scale");
    };
    assert!((x - 1.06).abs() < 1e-9);

    let tag = bar.find("histogram:price").unwrap();
    assert_eq!(text_of(&tag.children[0]), "2330");
    assert!(n.find("bar:4").unwrap().find("histogram:price").is_none());
}

#[test]
fn grid_labels_span_value_range() {
    let n = render(60);
    assert_eq!(text_of(n.find("grid:0:label").unwrap()), "2735");
    assert_eq!(text_of(n.find("grid:2:label").unwrap()), "2380");
    assert_eq!(text_of(n.find("grid:4:label").unwrap()), "2024");
    assert_eq!(text_of(n.find("histogram:peak").unwrap()), "Peak: 2735");
}
