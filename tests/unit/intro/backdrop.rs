use super::*;
use crate::assets::store::AssetStore;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::style::style::TransformOp;

fn ctx(assets: &AssetStore, frame: u64) -> SceneCtx<'_> {
    SceneCtx {
        frame: FrameIndex(frame),
        fps: Fps::default(),
        canvas: Canvas::new(1920, 1080).unwrap(),
        duration: 400,
        assets,
    }
}

#[test]
fn glows_fade_in_and_drift() {
    let assets = AssetStore::empty();
    let scene = AmbientGlows::new(Arc::new(IntroConfig::default()), 190, GlowInset::Padding);
    let first = scene.render(&ctx(&assets, 0)).unwrap();
    assert_eq!(first.style.opacity, 0.0);
    assert_eq!(first.style.inset.top, px(-115.0));
    assert_eq!(
        first.style.transform[0],
        TransformOp::Translate {
            x: px(-18.0),
            y: px(14.0)
        }
    );
    let end = scene.render(&ctx(&assets, 300)).unwrap();
    assert_eq!(end.style.opacity, 1.0);
    assert_eq!(
        end.style.transform[0],
        TransformOp::Translate {
            x: px(18.0),
            y: px(-14.0)
        }
    );
    assert_eq!(end.children.len(), 2);
    assert_eq!(end.children[0].style.width, px(1056.0));
}

#[test]
fn gold_glow_and_overscan() {
    let assets = AssetStore::empty();
    let scene =
        AmbientGlows::new(Arc::new(IntroConfig::default()), 420, GlowInset::Overscan).with_gold();
    let n = scene.render(&ctx(&assets, 20)).unwrap();
    assert_eq!(n.style.inset.left, px(-194.0));
    let gold = n.find("glow:gold").unwrap();
    assert_eq!(gold.style.opacity, 0.5);
}
