//! Damped-spring easing.
//!
//! The spring is integrated frame by frame with the closed-form solution of a damped harmonic
//! oscillator, so a value at frame `n` depends only on the config, the fps and `n`. Progress is
//! always computed from 0 to 1 and then mapped onto `from..to`.

use crate::animation::interpolate::{InterpolateOpts, interpolate};
use crate::foundation::core::Fps;
use crate::foundation::error::{ReelError, ReelResult};

/// Frames a spring must stay inside the rest threshold before it counts as settled.
const SETTLE_FRAMES: u32 = 20;
/// Upper bound on the integration step in milliseconds.
const MAX_STEP_MS: f64 = 64.0;
/// Give up measuring after this many frames.
const MEASURE_LIMIT_FRAMES: u64 = 1_000_000;

/// Physical parameters of a spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Damping coefficient, must be `> 0`.
    pub damping: f64,
    /// Mass, must be `> 0`.
    pub mass: f64,
    /// Stiffness, must be `> 0`.
    pub stiffness: f64,
    /// Never let progress exceed the target.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            mass: 1.0,
            stiffness: 100.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Config with explicit damping, stiffness and mass.
    pub const fn new(damping: f64, stiffness: f64, mass: f64) -> Self {
        Self {
            damping,
            mass,
            stiffness,
            overshoot_clamping: false,
        }
    }

    /// Config with explicit damping and stiffness, unit mass.
    pub const fn damped(damping: f64, stiffness: f64) -> Self {
        Self::new(damping, stiffness, 1.0)
    }

    /// Validate that every physical parameter is finite and positive.
    pub fn validate(&self) -> ReelResult<()> {
        for (name, v) in [
            ("damping", self.damping),
            ("mass", self.mass),
            ("stiffness", self.stiffness),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ReelError::animation(format!(
                    "spring {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Damping ratio `c / (2 * sqrt(k * m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Position and velocity of a spring heading from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringState {
    /// Current progress.
    pub current: f64,
    /// Current velocity in progress units per second.
    pub velocity: f64,
    last_ms: f64,
}

impl SpringState {
    fn at_rest() -> Self {
        Self {
            current: 0.0,
            velocity: 0.0,
            last_ms: 0.0,
        }
    }

    fn advance(self, now_ms: f64, config: &SpringConfig) -> Self {
        const TO: f64 = 1.0;

        let dt_ms = (now_ms - self.last_ms).min(MAX_STEP_MS);
        let t = dt_ms / 1000.0;

        let v0 = -self.velocity;
        let x0 = TO - self.current;
        let zeta = config.damping_ratio();
        let omega0 = (config.stiffness / config.mass).sqrt();

        let (current, velocity) = if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let (sin1, cos1) = (omega1 * t).sin_cos();
            let envelope = (-zeta * omega0 * t).exp();
            let frag = envelope * (sin1 * ((v0 + zeta * omega0 * x0) / omega1) + x0 * cos1);
            let velocity = zeta * omega0 * frag
                - envelope * (cos1 * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin1);
            (TO - frag, velocity)
        } else {
            let envelope = (-omega0 * t).exp();
            let position = TO - envelope * (x0 + (v0 + omega0 * x0) * t);
            let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
            (position, velocity)
        };

        Self {
            current,
            velocity,
            last_ms: now_ms,
        }
    }
}

/// Integrate a normalized (0 to 1) spring up to `frame`.
///
/// Negative frames clamp to 0. A fractional frame takes a fractional final step.
pub fn spring_state(frame: f64, fps: Fps, config: &SpringConfig) -> ReelResult<SpringState> {
    config.validate()?;
    if frame.is_nan() {
        return Err(ReelError::animation("spring frame must not be NaN"));
    }

    let frame = frame.max(0.0);
    let whole = frame.floor();
    let rest = frame - whole;
    let fps = fps.as_f64();

    let mut state = SpringState::at_rest();
    let mut f = 0.0;
    while f <= whole {
        let step = if f == whole { f + rest } else { f };
        state = state.advance(step / fps * 1000.0, config);
        f += 1.0;
    }
    Ok(state)
}

/// Number of frames a spring needs to settle within `threshold` of its target.
///
/// The spring is considered settled once it has stayed inside the threshold for a run of
/// consecutive frames; leaving the band again restarts the run.
pub fn measure_spring(fps: Fps, config: &SpringConfig, threshold: f64) -> ReelResult<u64> {
    config.validate()?;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(ReelError::animation(format!(
            "spring rest threshold must be finite and > 0, got {threshold}"
        )));
    }

    let fps_f = fps.as_f64();
    let mut frame = 0u64;
    let mut state = SpringState::at_rest().advance(0.0, config);
    let step = |state: SpringState, frame: u64| state.advance(frame as f64 / fps_f * 1000.0, config);
    let off = |state: &SpringState| (state.current - 1.0).abs() >= threshold;

    while off(&state) {
        frame += 1;
        if frame > MEASURE_LIMIT_FRAMES {
            return Err(ReelError::animation("spring does not settle"));
        }
        state = step(state, frame);
    }

    let mut finished = frame;
    let mut i = 0;
    while i < SETTLE_FRAMES {
        frame += 1;
        state = step(state, frame);
        if off(&state) {
            if frame > MEASURE_LIMIT_FRAMES {
                return Err(ReelError::animation("spring does not settle"));
            }
            i = 0;
            finished = frame + 1;
        }
        i += 1;
    }

    Ok(finished)
}

/// Fully specified spring animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Spring {
    /// Physical parameters.
    pub config: SpringConfig,
    /// Value at rest before the spring starts.
    pub from: f64,
    /// Target value.
    pub to: f64,
    /// Stretch or compress the spring so it settles after this many frames.
    pub duration_in_frames: Option<f64>,
    /// Frames to wait before the spring starts moving.
    pub delay: f64,
    /// Play the spring backwards.
    pub reverse: bool,
    /// Distance to the target below which the spring is considered settled.
    pub rest_threshold: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            config: SpringConfig::default(),
            from: 0.0,
            to: 1.0,
            duration_in_frames: None,
            delay: 0.0,
            reverse: false,
            rest_threshold: 0.005,
        }
    }
}

impl Spring {
    /// Spring from 0 to 1 with `config`.
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the start delay in frames.
    pub fn delay(mut self, frames: f64) -> Self {
        self.delay = frames;
        self
    }

    /// Force the spring to settle after `frames` frames.
    pub fn duration(mut self, frames: f64) -> Self {
        self.duration_in_frames = Some(frames);
        self
    }

    /// Map progress onto `from..to`.
    pub fn range(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Play backwards.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Sample the spring at `frame`.
    pub fn sample(&self, frame: f64, fps: Fps) -> ReelResult<f64> {
        if let Some(d) = self.duration_in_frames
            && (!d.is_finite() || d <= 0.0)
        {
            return Err(ReelError::animation(format!(
                "spring duration must be finite and > 0, got {d}"
            )));
        }

        let natural = if self.reverse || self.duration_in_frames.is_some() {
            Some(measure_spring(fps, &self.config, self.rest_threshold)? as f64)
        } else {
            None
        };

        let mut f = frame;
        if self.reverse {
            let span = self.duration_in_frames.or(natural).unwrap_or(0.0);
            f = span - f + self.delay;
        } else {
            f -= self.delay;
        }

        if let Some(d) = self.duration_in_frames {
            if f > d {
                return Ok(self.to);
            }
            let natural = natural.unwrap_or(d).max(1.0);
            f /= d / natural;
        }

        let state = spring_state(f, fps, &self.config)?;
        let progress = if self.config.overshoot_clamping {
            state.current.min(1.0)
        } else {
            state.current
        };

        if self.from == 0.0 && self.to == 1.0 {
            return Ok(progress);
        }
        interpolate(
            progress,
            &[0.0, 1.0],
            &[self.from, self.to],
            InterpolateOpts::default(),
        )
    }
}

/// Sample a 0 to 1 spring with `config` at `frame`.
pub fn spring(frame: f64, fps: Fps, config: SpringConfig) -> ReelResult<f64> {
    Spring::new(config).sample(frame, fps)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
