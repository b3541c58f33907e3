use crate::animation::ease::Ease;
use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::animation::spring::{Spring, SpringConfig, measure_spring};
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

const DEFAULT_REST_THRESHOLD: f64 = 0.005;

/// How a transition's progress advances from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Timing {
    /// Fixed duration with an easing curve.
    Linear {
        /// Duration in frames.
        duration: u64,
        /// Easing applied to progress.
        #[serde(default)]
        ease: Ease,
    },
    /// Spring-driven progress.
    Spring {
        /// Spring parameters.
        #[serde(default)]
        config: SpringConfig,
        /// Forced duration; the spring's natural settle time when unset.
        #[serde(default)]
        duration: Option<u64>,
    },
}

impl Timing {
    /// Linear timing over `duration` frames.
    pub fn linear(duration: u64) -> Self {
        Self::Linear {
            duration,
            ease: Ease::Linear,
        }
    }

    /// Spring timing stretched to `duration` frames.
    pub fn spring(config: SpringConfig, duration: Option<u64>) -> Self {
        Self::Spring { config, duration }
    }

    /// Total frames the transition lasts.
    pub fn duration_frames(&self, fps: Fps) -> ReelResult<u64> {
        match *self {
            Self::Linear { duration, .. } => Ok(duration),
            Self::Spring {
                duration: Some(d), ..
            } => Ok(d),
            Self::Spring {
                config,
                duration: None,
            } => measure_spring(fps, &config, DEFAULT_REST_THRESHOLD),
        }
    }

    /// Progress at `frame` frames into the transition.
    pub fn progress(&self, frame: f64, fps: Fps) -> ReelResult<f64> {
        match *self {
            Self::Linear { duration, ease } => {
                if duration == 0 {
                    return Err(ReelError::validation("linear timing needs duration > 0"));
                }
                interpolate(
                    frame,
                    &[0.0, duration as f64],
                    &[0.0, 1.0],
                    InterpolateOpts::clamped().with_easing(ease),
                )
            }
            Self::Spring { config, duration } => {
                let mut s = Spring::new(config);
                s.rest_threshold = DEFAULT_REST_THRESHOLD;
                if let Some(d) = duration {
                    s = s.duration(d as f64);
                }
                s.sample(frame, fps)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/timing.rs"]
mod tests;
