use crate::foundation::error::{ReelError, ReelResult};
use crate::style::node::Node;
use crate::style::style::{Length, pct};

/// Edge a sliding scene enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideFrom {
    /// Enters from the left edge, exits to the right.
    FromLeft,
    /// Enters from the right edge, exits to the left.
    FromRight,
    /// Enters from the top edge, exits to the bottom.
    FromTop,
    /// Enters from the bottom edge, exits to the top.
    FromBottom,
}

/// Visual treatment of the two scenes taking part in a transition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    /// The entering scene fades in on top of the exiting one.
    Fade {
        /// Also fade the exiting scene out.
        #[serde(default)]
        fade_out_exiting: bool,
    },
    /// Both scenes move together, one full size along the slide axis.
    Slide {
        /// Entry edge.
        direction: SlideFrom,
    },
}

/// Which side of a transition a sequence is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Sequence is coming in.
    Entering,
    /// Sequence is going out.
    Exiting,
}

impl Presentation {
    /// Crossfade that leaves the exiting scene opaque underneath.
    pub fn fade() -> Self {
        Self::Fade {
            fade_out_exiting: false,
        }
    }

    /// Slide from `direction`.
    pub fn slide(direction: SlideFrom) -> Self {
        Self::Slide { direction }
    }

    /// Wrap `content` in a full-size layer styled for `phase` at `progress`.
    pub fn apply(self, phase: Phase, progress: f64, content: Node) -> Node {
        let layer = Node::fill().named(match phase {
            Phase::Entering => "transition:enter",
            Phase::Exiting => "transition:exit",
        });
        match self {
            Self::Fade { fade_out_exiting } => {
                let opacity = match phase {
                    Phase::Entering => progress,
                    Phase::Exiting if fade_out_exiting => 1.0 - progress,
                    Phase::Exiting => 1.0,
                };
                layer.opacity(opacity).child(content)
            }
            Self::Slide { direction } => {
                let (x, y) = slide_offset(direction, phase, progress);
                layer.translate_len(x, y).child(content)
            }
        }
    }
}

fn slide_offset(direction: SlideFrom, phase: Phase, p: f64) -> (Length, Length) {
    let amount = match phase {
        Phase::Entering => (1.0 - p) * 100.0,
        Phase::Exiting => -p * 100.0,
    };
    match direction {
        SlideFrom::FromLeft => (pct(-amount), pct(0.0)),
        SlideFrom::FromRight => (pct(amount), pct(0.0)),
        SlideFrom::FromTop => (pct(0.0), pct(-amount)),
        SlideFrom::FromBottom => (pct(0.0), pct(amount)),
    }
}

/// Parse a presentation from a kind name and optional JSON params.
///
/// Accepts `fade`/`crossfade` (param `fade_out_exiting`) and `slide` (param `direction`, one of
/// `from-left`, `from-right`, `from-top`, `from-bottom`, also in snake case or as `left`/`right`/
/// `top`/`bottom`).
pub fn parse_presentation(kind: &str, params: &serde_json::Value) -> ReelResult<Presentation> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(ReelError::validation("presentation kind must be non-empty"));
    }

    let params = if params.is_null() {
        None
    } else {
        Some(params.as_object().ok_or_else(|| {
            ReelError::validation(format!("{kind} params must be an object"))
        })?)
    };

    match kind.as_str() {
        "fade" | "crossfade" => {
            let fade_out_exiting = match params.and_then(|p| p.get("fade_out_exiting")) {
                None => false,
                Some(v) => v.as_bool().ok_or_else(|| {
                    ReelError::validation("fade.fade_out_exiting must be a boolean")
                })?,
            };
            Ok(Presentation::Fade { fade_out_exiting })
        }
        "slide" => {
            let direction = match params
                .and_then(|p| p.get("direction"))
                .and_then(|v| v.as_str())
            {
                None => SlideFrom::FromLeft,
                Some(s) => match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
                    "from-left" | "left" => SlideFrom::FromLeft,
                    "from-right" | "right" => SlideFrom::FromRight,
                    "from-top" | "top" => SlideFrom::FromTop,
                    "from-bottom" | "bottom" => SlideFrom::FromBottom,
                    other => {
                        return Err(ReelError::validation(format!(
                            "unknown slide.direction '{other}'"
                        )));
                    }
                },
            };
            Ok(Presentation::Slide { direction })
        }
        _ => Err(ReelError::validation(format!(
            "unknown presentation kind '{kind}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/presentation.rs"]
mod tests;
