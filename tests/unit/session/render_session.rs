use super::*;
use crate::assets::store::AssetStore;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::{Canvas, Fps};
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::color::Color;
use crate::style::style::px;

/// Holds still for the first four frames, then grows a bar one pixel per frame.
#[derive(Debug)]
struct HoldThenGrow;

impl Scene for HoldThenGrow {
    fn name(&self) -> &str {
        "hold-then-grow"
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let w = 4.0 + (ctx.f() - 4.0).max(0.0);
        Ok(Node::row()
            .named("bar")
            .size(px(w), px(8.0))
            .bg(Color::rgb(255, 0, 0)))
    }
}

fn session(duration: u64, opts: RenderSessionOpts) -> RenderSession {
    let comp = Composition::new(
        "test",
        Canvas::new(32, 16).unwrap(),
        Fps::new(30, 1).unwrap(),
        Some(duration),
        Arc::new(HoldThenGrow),
        Arc::new(AssetStore::empty()),
    )
    .unwrap()
    .with_background(Color::rgb(0, 0, 255));
    RenderSession::new(comp, opts).unwrap()
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

#[test]
fn render_frame_draws_background_and_scene() {
    let mut s = session(10, RenderSessionOpts::default());
    let f = s.render_frame(FrameIndex(0)).unwrap();
    assert_eq!((f.width, f.height), (32, 16));
    assert_eq!(f.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(20, 12), Some([0, 0, 255, 255]));

    let later = s.render_frame(FrameIndex(9)).unwrap();
    assert_eq!(later.pixel(8, 1), Some([255, 0, 0, 255]));
    assert!(s.render_frame(FrameIndex(10)).is_err());
}

#[test]
fn evaluate_exposes_tree_and_display_list() {
    let mut s = session(10, RenderSessionOpts::default());
    let snap = s.evaluate(FrameIndex(6)).unwrap();
    assert_eq!(snap.composition, "test");
    assert!(snap.tree.find("bar").is_some());
    assert!(snap.render.draw_count() >= 2);
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["frame"], 6);
    assert_eq!(json["render"]["width"], 32);
}

#[test]
fn sequential_range_is_ordered_and_complete() {
    let mut s = session(10, RenderSessionOpts::default());
    let mut sink = InMemorySink::new();
    let stats = s.render_range(range(2, 9), &mut sink).unwrap();
    assert_eq!(
        stats,
        RenderStats {
            frames_total: 7,
            frames_rendered: 7,
            frames_elided: 0,
        }
    );
    assert!(sink.is_finished());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, (2..9).collect::<Vec<_>>());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (32, 16));
}

#[test]
fn elision_reuses_identical_frames() {
    let opts = RenderSessionOpts {
        static_frame_elision: true,
        chunk_size: 16,
        ..RenderSessionOpts::default()
    };
    let mut s = session(8, opts);
    let mut sink = InMemorySink::new();
    let stats = s.render_range(range(0, 8), &mut sink).unwrap();
    // Frames 0..=4 share one display list.
    assert_eq!(stats.frames_total, 8);
    assert_eq!(stats.frames_rendered, 4);
    assert_eq!(stats.frames_elided, 4);
    let frames = sink.frames();
    assert_eq!(frames[0].1, frames[4].1);
    assert_ne!(frames[4].1, frames[5].1);
}

#[test]
fn parallel_matches_sequential() {
    let mut seq = session(12, RenderSessionOpts::default());
    let mut a = InMemorySink::new();
    seq.render_range(range(0, 12), &mut a).unwrap();

    for elide in [false, true] {
        let opts = RenderSessionOpts {
            parallel: true,
            threads: Some(3),
            chunk_size: 5,
            static_frame_elision: elide,
            ..RenderSessionOpts::default()
        };
        let mut par = session(12, opts);
        let mut b = InMemorySink::new();
        let stats = par.render_range(range(0, 12), &mut b).unwrap();
        assert_eq!(stats.frames_total, 12);
        assert_eq!(a.frames(), b.frames());
    }
}

#[test]
fn range_validation() {
    let mut s = session(5, RenderSessionOpts::default());
    let mut sink = InMemorySink::new();
    assert!(s.render_range(range(2, 2), &mut sink).is_err());
    assert!(s.render_range(range(0, 6), &mut sink).is_err());

    let opts = RenderSessionOpts {
        parallel: true,
        threads: Some(0),
        ..RenderSessionOpts::default()
    };
    let mut p = session(5, opts);
    let err = p.render_range(range(0, 5), &mut sink).unwrap_err();
    assert!(err.to_string().contains("threads"));
}

/// Accepts `accept` frames, then rejects the rest; `accept == None` rejects `begin`.
struct RejectingSink {
    accept: Option<usize>,
    pushed: usize,
}

impl FrameSink for RejectingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        match self.accept {
            Some(_) => Ok(()),
            None => Err(ReelError::validation("output file 'x.mp4' already exists")),
        }
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> ReelResult<()> {
        if Some(self.pushed) == self.accept {
            return Err(ReelError::evaluation("disk full"));
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

#[test]
fn sink_errors_surface_from_render_range() {
    for parallel in [false, true] {
        let opts = RenderSessionOpts {
            parallel,
            chunk_size: 2,
            threads: Some(2),
            channel_capacity: 1,
            ..RenderSessionOpts::default()
        };
        let mut s = session(10, opts);

        let mut rejects_begin = RejectingSink {
            accept: None,
            pushed: 0,
        };
        let err = s.render_range(range(0, 10), &mut rejects_begin).unwrap_err();
        assert!(err.to_string().contains("already exists"), "{err}");

        let mut rejects_fourth = RejectingSink {
            accept: Some(3),
            pushed: 0,
        };
        let err = s.render_range(range(0, 10), &mut rejects_fourth).unwrap_err();
        assert!(err.to_string().contains("disk full"), "{err}");
        assert_eq!(rejects_fourth.pushed, 3);
    }
}
