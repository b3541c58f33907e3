use super::*;
use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::style::style::{Length, TransformOp};

fn ctx(assets: &AssetStore, frame: u64) -> SceneCtx<'_> {
    SceneCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::new(1920, 1080).unwrap(),
        duration: 95,
        assets,
    }
}

fn render(frame: u64) -> Node {
    let assets = AssetStore::empty();
    ValueProp::on_card(Arc::new(IntroConfig::default()))
        .render(&ctx(&assets, frame))
        .unwrap()
}

#[test]
fn chips_are_staggered_by_five_frames() {
    let n = render(22);
    let op = |i: usize| n.find(&format!("chip:{i}")).unwrap().style.opacity;
    assert!((op(0) - 0.5).abs() < 1e-9);
    assert!((op(1) - 0.25).abs() < 1e-9);
    assert_eq!(op(2), 0.0);
}

#[test]
fn cta_pulses_and_sweep_crosses() {
    let n = render(52);
    let button = n.find("cta:button").unwrap();
    let TransformOp::Scale { x, .. } = button.style.transform[1] else {
        panic!("second op must be the pulse scale");
    };
    assert!((x - 1.05).abs() < 1e-9);
    assert!(button.style.clip);

    let start = render(40);
    let sweep = start.find("cta:sweep").unwrap();
    assert_eq!(sweep.style.inset.left, Length::Px(-461.0));
    assert_eq!(sweep.style.opacity, 0.0);

    let end = render(62);
    let sweep = end.find("cta:sweep").unwrap();
    assert_eq!(sweep.style.inset.left, Length::Px(1728.0));
    assert_eq!(sweep.style.opacity, 0.0);
    assert_eq!(render(48).find("cta:sweep").unwrap().style.opacity, 1.0);
}

#[test]
fn clean_variant_drops_card() {
    let assets = AssetStore::empty();
    let n = ValueProp::clean(Arc::new(IntroConfig::default()))
        .render(&ctx(&assets, 10))
        .unwrap();
    assert!(n.find("value:card").is_none());
    assert!(n.find("value:headline").is_some());
}

#[test]
fn chip_dot_tracks_label_size() {
    // Labels are max(18, round(1920 * 0.018)) = 35px; dots are 60% of that.
    let n = render(40);
    let dot = n.find("chip:0:dot").unwrap();
    assert_eq!(dot.style.width, Length::Px(21.0));
    assert_eq!(dot.style.height, Length::Px(21.0));
}
