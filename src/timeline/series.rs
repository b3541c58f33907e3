//! Sequences of scenes joined by transitions.
//!
//! Two sequences joined by a transition overlap for the transition's duration: the outgoing
//! sequence plays its last frames while the incoming one plays its first. A transition placed
//! before the first sequence only animates it in; one after the last sequence only animates it
//! out. Neither changes the series length.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::node::Node;
use crate::timeline::presentation::{Phase, Presentation};
use crate::timeline::timing::Timing;

/// One entry of a [`TransitionSeries`].
#[derive(Clone, Debug)]
pub enum SeriesItem {
    /// A scene shown for a fixed number of frames.
    Sequence {
        /// Debug name.
        name: String,
        /// Frames the scene is visible.
        duration: u64,
        /// Scene content.
        content: Arc<dyn Scene>,
    },
    /// A transition between its neighbours.
    Transition {
        /// Visual treatment.
        presentation: Presentation,
        /// Progress curve and duration.
        timing: Timing,
    },
}

/// Transition window affecting a placed sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionWindow {
    /// First frame of the window, series-relative.
    pub start: u64,
    /// Window length in frames.
    pub duration: u64,
    /// Visual treatment.
    pub presentation: Presentation,
    /// Progress curve.
    pub timing: Timing,
}

/// A sequence resolved onto the series timeline.
#[derive(Clone, Debug)]
pub struct Placement {
    /// Index into the sequence list (transitions excluded).
    pub sequence: usize,
    /// Debug name.
    pub name: String,
    /// First frame, series-relative.
    pub start: u64,
    /// Frames the sequence is visible.
    pub duration: u64,
    /// Transition bringing the sequence in.
    pub enter: Option<TransitionWindow>,
    /// Transition taking the sequence out.
    pub exit: Option<TransitionWindow>,
    content: Arc<dyn Scene>,
}

impl Placement {
    /// Exclusive end frame.
    pub fn end(&self) -> u64 {
        self.start + self.duration
    }
}

/// A sequence visible at a given frame, with any transition state applied to it.
#[derive(Clone, Debug)]
pub struct ActiveSequence<'a> {
    /// Placement on the series timeline.
    pub placement: &'a Placement,
    /// Frame relative to the sequence start.
    pub local_frame: u64,
    /// Presentations in effect, innermost first.
    pub effects: SmallVec<[(Presentation, Phase, f64); 2]>,
}

/// Ordered scenes with transitions, resolved to a timeline at construction.
#[derive(Clone, Debug)]
pub struct TransitionSeries {
    name: String,
    placements: Vec<Placement>,
    duration: u64,
    fps: Fps,
}

impl TransitionSeries {
    /// Start building a series.
    pub fn builder(name: impl Into<String>) -> TransitionSeriesBuilder {
        TransitionSeriesBuilder {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Resolve `items` onto a timeline.
    pub fn new(name: impl Into<String>, items: Vec<SeriesItem>, fps: Fps) -> ReelResult<Self> {
        let name = name.into();
        let (placements, duration) = resolve(&name, &items, fps)?;
        Ok(Self {
            name,
            placements,
            duration,
            fps,
        })
    }

    /// Total length in frames.
    pub fn duration_frames(&self) -> u64 {
        self.duration
    }

    /// Frame rate used to resolve spring timings.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Resolved sequence placements in declaration order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Sequences visible at `frame`, bottom to top.
    pub fn active(&self, frame: FrameIndex) -> ReelResult<Vec<ActiveSequence<'_>>> {
        let f = frame.0;
        let mut out = Vec::new();
        for p in &self.placements {
            if f < p.start || f >= p.end() {
                continue;
            }
            let mut effects = SmallVec::new();
            if let Some(w) = p.enter
                && f >= w.start
                && f < w.start + w.duration
            {
                let progress = w.timing.progress((f - w.start) as f64, self.fps)?;
                effects.push((w.presentation, Phase::Entering, progress));
            }
            if let Some(w) = p.exit
                && f >= w.start
                && f < w.start + w.duration
            {
                let progress = w.timing.progress((f - w.start) as f64, self.fps)?;
                effects.push((w.presentation, Phase::Exiting, progress));
            }
            out.push(ActiveSequence {
                placement: p,
                local_frame: f - p.start,
                effects,
            });
        }
        Ok(out)
    }
}

fn resolve(name: &str, items: &[SeriesItem], fps: Fps) -> ReelResult<(Vec<Placement>, u64)> {
    let mut placements: Vec<Placement> = Vec::new();
    let mut pending: Option<(Presentation, Timing, u64)> = None;
    let mut cursor: u64 = 0;

    for (i, item) in items.iter().enumerate() {
        match item {
            SeriesItem::Transition {
                presentation,
                timing,
            } => {
                if pending.is_some() {
                    return Err(ReelError::validation(format!(
                        "series '{name}': item {i} is a transition directly after another"
                    )));
                }
                let d = timing.duration_frames(fps)?;
                if d == 0 {
                    return Err(ReelError::validation(format!(
                        "series '{name}': transition {i} has zero duration"
                    )));
                }
                if let Some(prev) = placements.last_mut() {
                    if d > prev.duration {
                        return Err(ReelError::validation(format!(
                            "series '{name}': transition {i} ({d} frames) is longer than '{}' ({} frames)",
                            prev.name, prev.duration
                        )));
                    }
                    prev.exit = Some(TransitionWindow {
                        start: prev.end() - d,
                        duration: d,
                        presentation: *presentation,
                        timing: *timing,
                    });
                }
                pending = Some((*presentation, *timing, d));
            }
            SeriesItem::Sequence {
                name: seq_name,
                duration,
                content,
            } => {
                if *duration == 0 {
                    return Err(ReelError::validation(format!(
                        "series '{name}': sequence '{seq_name}' has zero duration"
                    )));
                }
                let mut start = cursor;
                let mut enter = None;
                if let Some((presentation, timing, d)) = pending.take() {
                    if d > *duration {
                        return Err(ReelError::validation(format!(
                            "series '{name}': transition into '{seq_name}' ({d} frames) is longer than the sequence ({duration} frames)"
                        )));
                    }
                    // Leading transitions only animate the first sequence in.
                    if !placements.is_empty() {
                        start = cursor - d;
                    }
                    enter = Some(TransitionWindow {
                        start,
                        duration: d,
                        presentation,
                        timing,
                    });
                }
                placements.push(Placement {
                    sequence: placements.len(),
                    name: seq_name.clone(),
                    start,
                    duration: *duration,
                    enter,
                    exit: None,
                    content: Arc::clone(content),
                });
                cursor = start + duration;
            }
        }
    }

    if placements.is_empty() {
        return Err(ReelError::validation(format!(
            "series '{name}' needs at least one sequence"
        )));
    }
    Ok((placements, cursor))
}

impl Scene for TransitionSeries {
    fn name(&self) -> &str {
        &self.name
    }

    fn duration(&self, _fps: Fps) -> ReelResult<Option<u64>> {
        Ok(Some(self.duration))
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let mut root = Node::fill().named(format!("series:{}", self.name));
        for active in self.active(ctx.frame)? {
            let p = active.placement;
            let local = ctx.local(active.local_frame, p.duration);
            let mut node = Node::fill()
                .named(format!("sequence:{}", p.name))
                .child(p.content.render(&local)?);
            for (presentation, phase, progress) in active.effects {
                node = presentation.apply(phase, progress, node);
            }
            root = root.child(node);
        }
        Ok(root)
    }
}

/// Fluent builder for [`TransitionSeries`].
#[derive(Debug)]
pub struct TransitionSeriesBuilder {
    name: String,
    items: Vec<SeriesItem>,
}

impl TransitionSeriesBuilder {
    /// Append a sequence.
    pub fn sequence(
        mut self,
        name: impl Into<String>,
        duration: u64,
        content: impl Scene + 'static,
    ) -> Self {
        self.items.push(SeriesItem::Sequence {
            name: name.into(),
            duration,
            content: Arc::new(content),
        });
        self
    }

    /// Append a transition.
    pub fn transition(mut self, presentation: Presentation, timing: Timing) -> Self {
        self.items.push(SeriesItem::Transition {
            presentation,
            timing,
        });
        self
    }

    /// Resolve the timeline.
    pub fn build(self, fps: Fps) -> ReelResult<TransitionSeries> {
        TransitionSeries::new(self.name, self.items, fps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/series.rs"]
mod tests;
