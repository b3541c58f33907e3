use super::*;
use crate::animation::spring::SpringConfig;
use crate::assets::store::AssetStore;
use crate::foundation::core::Canvas;
use crate::timeline::presentation::SlideFrom;

#[derive(Debug)]
struct Probe(&'static str);

impl Scene for Probe {
    fn name(&self) -> &str {
        self.0
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        Ok(Node::row().named(format!("{}@{}/{}", self.0, ctx.frame.0, ctx.duration)))
    }
}

fn fps() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn names(series: &TransitionSeries, frame: u64) -> Vec<(String, u64, usize)> {
    series
        .active(FrameIndex(frame))
        .unwrap()
        .into_iter()
        .map(|a| (a.placement.name.clone(), a.local_frame, a.effects.len()))
        .collect()
}

#[test]
fn transitions_overlap_neighbours() {
    let s = TransitionSeries::builder("main")
        .sequence("a", 95, Probe("a"))
        .transition(Presentation::fade(), Timing::linear(16))
        .sequence("b", 95, Probe("b"))
        .build(fps())
        .unwrap();

    assert_eq!(s.duration_frames(), 95 + 95 - 16);
    let p = s.placements();
    assert_eq!((p[0].start, p[1].start), (0, 79));
    assert_eq!(p[0].exit.unwrap().start, 79);
    assert_eq!(p[1].enter.unwrap().start, 79);

    assert_eq!(names(&s, 78), vec![("a".to_owned(), 78, 0)]);
    assert_eq!(
        names(&s, 80),
        vec![("a".to_owned(), 80, 1), ("b".to_owned(), 1, 1)]
    );
    assert_eq!(names(&s, 95), vec![("b".to_owned(), 16, 0)]);
}

#[test]
fn product_tour_timeline_length() {
    let fade = || Timing::linear(16);
    let s = TransitionSeries::builder("tour")
        .sequence("brand", 95, Probe("brand"))
        .transition(Presentation::fade(), fade())
        .sequence("value", 95, Probe("value"))
        .transition(Presentation::fade(), fade())
        .sequence("cta", 80, Probe("cta"))
        .transition(Presentation::fade(), fade())
        .sequence("chart", 150, Probe("chart"))
        .build(fps())
        .unwrap();
    assert_eq!(s.duration_frames(), 95 + 95 + 80 + 150 - 3 * 16);
}

#[test]
fn trailing_transition_animates_last_sequence_out() {
    let s = TransitionSeries::builder("scene2")
        .sequence("card", 95, Probe("card"))
        .transition(
            Presentation::slide(SlideFrom::FromBottom),
            Timing::spring(SpringConfig::damped(200.0, 100.0), Some(20)),
        )
        .build(fps())
        .unwrap();

    assert_eq!(s.duration_frames(), 95);
    let exit = s.placements()[0].exit.unwrap();
    assert_eq!((exit.start, exit.duration), (75, 20));

    let active = s.active(FrameIndex(85)).unwrap();
    let (_, phase, progress) = active[0].effects[0];
    assert_eq!(phase, Phase::Exiting);
    assert!(progress > 0.0 && progress < 1.0);
    assert!(s.active(FrameIndex(74)).unwrap()[0].effects.is_empty());
}

#[test]
fn leading_transition_animates_first_sequence_in() {
    let s = TransitionSeries::builder("intro")
        .transition(Presentation::fade(), Timing::linear(10))
        .sequence("a", 30, Probe("a"))
        .build(fps())
        .unwrap();
    assert_eq!(s.duration_frames(), 30);
    let a = s.active(FrameIndex(5)).unwrap();
    assert_eq!(a[0].effects[0].1, Phase::Entering);
    assert_eq!(a[0].effects[0].2, 0.5);
}

#[test]
fn invalid_series_are_rejected() {
    assert!(TransitionSeries::builder("empty").build(fps()).is_err());
    assert!(
        TransitionSeries::builder("zero")
            .sequence("a", 0, Probe("a"))
            .build(fps())
            .is_err()
    );
    let err = TransitionSeries::builder("double")
        .sequence("a", 30, Probe("a"))
        .transition(Presentation::fade(), Timing::linear(5))
        .transition(Presentation::fade(), Timing::linear(5))
        .sequence("b", 30, Probe("b"))
        .build(fps())
        .unwrap_err();
    assert!(err.to_string().contains("directly after another"));
    assert!(
        TransitionSeries::builder("long")
            .sequence("a", 10, Probe("a"))
            .transition(Presentation::fade(), Timing::linear(20))
            .sequence("b", 30, Probe("b"))
            .build(fps())
            .is_err()
    );
    assert!(
        TransitionSeries::builder("long-in")
            .sequence("a", 30, Probe("a"))
            .transition(Presentation::fade(), Timing::linear(20))
            .sequence("b", 10, Probe("b"))
            .build(fps())
            .is_err()
    );
}

#[test]
fn render_stacks_sequences_with_local_frames() {
    let s = TransitionSeries::builder("main")
        .sequence("a", 20, Probe("a"))
        .transition(Presentation::fade(), Timing::linear(10))
        .sequence("b", 20, Probe("b"))
        .build(fps())
        .unwrap();
    let store = AssetStore::empty();
    let ctx = SceneCtx {
        frame: FrameIndex(15),
        fps: fps(),
        canvas: Canvas::new(320, 180).unwrap(),
        duration: s.duration_frames(),
        assets: &store,
    };
    let tree = s.render(&ctx).unwrap();
    assert_eq!(tree.children.len(), 2);
    assert!(tree.find("a@15/20").is_some());
    assert!(tree.find("b@5/20").is_some());
    let enter = &tree.children[1];
    assert_eq!(enter.name.as_deref(), Some("transition:enter"));
    assert_eq!(enter.style.opacity, 0.5);
}

#[test]
fn nested_series_reports_its_duration() {
    let inner = TransitionSeries::builder("inner")
        .sequence("x", 40, Probe("x"))
        .build(fps())
        .unwrap();
    assert_eq!(inner.duration(fps()).unwrap(), Some(40));
    let outer = TransitionSeries::builder("outer")
        .sequence("nested", 40, inner)
        .build(fps())
        .unwrap();
    assert_eq!(outer.duration_frames(), 40);
}
