use super::*;
use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::style::style::Length;

fn ctx(assets: &AssetStore, frame: u64) -> SceneCtx<'_> {
    SceneCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::new(1920, 1080).unwrap(),
        duration: 95,
        assets,
    }
}

#[test]
fn entrance_is_staggered() {
    let assets = AssetStore::empty();
    let scene = BrandReveal::on_card(Arc::new(IntroConfig::default()));
    let n = scene.render(&ctx(&assets, 0)).unwrap();
    let logo = n.find("brand:logo").unwrap();
    assert!((logo.style.opacity - 2.0 / 14.0).abs() < 1e-9);
    assert_eq!(n.find("brand:name").unwrap().style.opacity, 0.0);
    assert_eq!(n.find("brand:tagline").unwrap().style.opacity, 0.0);
    assert_eq!(n.find("brand:underline").unwrap().style.width, px(0.0));
    assert_eq!(n.find("brand:card").unwrap().style.opacity, 0.0);
}

#[test]
fn settles_by_end_of_scene() {
    let assets = AssetStore::empty();
    let scene = BrandReveal::on_card(Arc::new(IntroConfig::default()));
    let n = scene.render(&ctx(&assets, 94)).unwrap();
    for name in ["brand:logo", "brand:name", "brand:tagline", "brand:card"] {
        assert_eq!(n.find(name).unwrap().style.opacity, 1.0, "{name}");
    }
    let Length::Px(w) = n.find("brand:underline").unwrap().style.width else {
        panic!("underline width must be pixels");
    };
    // max(120, round(1920 * 0.18)) = 346
    assert!((w - 346.0).abs() < 2.0, "underline {w}");
}

#[test]
fn clean_variant_has_no_card() {
    let assets = AssetStore::empty();
    let scene = BrandReveal::clean(Arc::new(IntroConfig::default()));
    assert_eq!(scene.name(), "brand-reveal");
    let n = scene.render(&ctx(&assets, 40)).unwrap();
    assert!(n.find("brand:card").is_none());
    assert!(n.find("logo:monogram").is_some());
}
