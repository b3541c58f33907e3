use super::*;
use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::style::node::NodeKind;
use crate::style::style::Length;

fn ctx(assets: &AssetStore, frame: u64) -> SceneCtx<'_> {
    SceneCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::new(1920, 1080).unwrap(),
        duration: 150,
        assets,
    }
}

fn render(frame: u64) -> Node {
    let assets = AssetStore::empty();
    GoldChart::new(Arc::new(IntroConfig::default()))
        .render(&ctx(&assets, frame))
        .unwrap()
}

fn text_of(n: &Node) -> &str {
    match &n.kind {
        NodeKind::Text { text, .. } => text,
        other => panic!("not a text node: {other:?}"),
    }
}

#[test]
fn metrics_follow_canvas() {
    let assets = AssetStore::empty();
    let m = PlotMetrics::new(&ctx(&assets, 0), 12);
    assert_eq!(m.padding, 115.0);
    assert_eq!(m.title_size, 106.0);
    assert_eq!(m.top, 258.0);
    assert_eq!(m.width, 1690.0);
    assert_eq!(m.height, 634.0);
    assert_eq!(m.gap, 20.0);
    assert_eq!(m.bar_w, 122.0);
}

#[test]
fn plot_is_placed_absolutely() {
    let n = render(0);
    let plot = n.find("gold:plot").unwrap();
    assert_eq!(plot.style.inset.top, Length::Px(258.0));
    assert_eq!(plot.style.inset.left, Length::Px(115.0));
    let bar = plot.find("bar:1").unwrap();
    assert_eq!(bar.style.inset.left, Length::Px(142.0));
    assert_eq!(bar.style.height, Length::Px(0.0));
}

#[test]
fn ticks_and_labels_use_thousands_separators() {
    let n = render(90);
    assert_eq!(text_of(n.find("tick:0:label").unwrap()), "2,735");
    assert_eq!(text_of(n.find("tick:1:label").unwrap()), "2,593");
    assert_eq!(text_of(n.find("tick:5:label").unwrap()), "2,024");
    assert_eq!(text_of(n.find("bar:0:value").unwrap()), "2,039");
    assert_eq!(text_of(n.find("bar:11:month").unwrap()), "Dec");
}

#[test]
fn peak_bar_shines_brighter() {
    let n = render(90);
    assert_eq!(n.find("bar:9:shine").unwrap().style.opacity, 0.55);
    let other = n.find("bar:2:shine").unwrap().style.opacity;
    assert!((other - 0.18).abs() < 1e-9);
}

#[test]
fn callout_names_last_point() {
    let n = render(0);
    let callout = n.find("gold:callout").unwrap();
    assert_eq!(callout.style.opacity, 0.0);
    assert_eq!(text_of(&callout.children[0]), "Dec:");
    assert_eq!(text_of(&callout.children[1]), "2,650");
    assert_eq!(render(70).find("gold:callout").unwrap().style.opacity, 1.0);
}
