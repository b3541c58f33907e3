use super::*;

fn ctx(store: &AssetStore, frame: u64) -> SceneCtx<'_> {
    SceneCtx {
        frame: FrameIndex(frame),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas::new(1920, 1080).unwrap(),
        duration: 95,
        assets: store,
    }
}

#[test]
fn responsive_helpers_use_canvas_axes() {
    let store = AssetStore::empty();
    let c = ctx(&store, 0);
    assert_eq!(c.rw(0.06, 48.0), 115.0);
    assert_eq!(c.rh(0.05, 30.0), 54.0);
    assert_eq!(c.rh(0.01, 30.0), 30.0);
}

#[test]
fn spring_respects_delay() {
    let store = AssetStore::empty();
    let cfg = SpringConfig::new(14.0, 180.0, 0.8);
    assert_eq!(ctx(&store, 6).spring(6.0, cfg).unwrap(), 0.0);
    assert!(ctx(&store, 20).spring(6.0, cfg).unwrap() > 0.5);
}

#[test]
fn local_context_keeps_video_config() {
    let store = AssetStore::empty();
    let c = ctx(&store, 50).local(3, 20);
    assert_eq!(c.frame, FrameIndex(3));
    assert_eq!(c.duration, 20);
    assert_eq!(c.canvas.width, 1920);
}

#[test]
fn interp_clamps_frame_ranges() {
    let store = AssetStore::empty();
    assert_eq!(ctx(&store, 40).interp(&[0.0, 25.0], &[0.0, 1.0]).unwrap(), 1.0);
}
