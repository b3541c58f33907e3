use crate::animation::ease::Ease;
use crate::foundation::error::{ReelError, ReelResult};

/// Behaviour of [`interpolate`] for inputs outside the input range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Continue the boundary segment linearly.
    #[default]
    Extend,
    /// Hold the boundary output value.
    Clamp,
    /// Return the input unchanged.
    Identity,
    /// Wrap the input back into the input range.
    Wrap,
}

/// Options for [`interpolate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InterpolateOpts {
    /// Left-side extrapolation.
    pub left: Extrapolate,
    /// Right-side extrapolation.
    pub right: Extrapolate,
    /// Easing applied to progress within the matched segment.
    pub easing: Ease,
}

impl InterpolateOpts {
    /// Clamp on both sides with linear easing.
    pub fn clamped() -> Self {
        Self {
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
            easing: Ease::Linear,
        }
    }

    /// Replace the easing curve.
    pub fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }
}

/// Map `input` from `input_range` onto `output_range`, piecewise linearly.
///
/// Both ranges must have the same length (at least 2), hold finite values, and `input_range` must
/// be strictly increasing. The segment used is the first one whose upper bound is `>= input`, so
/// inputs past either end fall into the first or last segment and are then extrapolated according
/// to `opts`.
pub fn interpolate(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    opts: InterpolateOpts,
) -> ReelResult<f64> {
    validate_ranges(input, input_range, output_range)?;

    let seg = find_segment(input, input_range);
    Ok(interpolate_segment(
        input,
        (input_range[seg], input_range[seg + 1]),
        (output_range[seg], output_range[seg + 1]),
        opts,
    ))
}

/// [`interpolate`] with both sides clamped, the form used for frame-driven styles.
pub fn interpolate_clamped(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
) -> ReelResult<f64> {
    interpolate(input, input_range, output_range, InterpolateOpts::clamped())
}

fn validate_ranges(input: f64, input_range: &[f64], output_range: &[f64]) -> ReelResult<()> {
    if input.is_nan() {
        return Err(ReelError::animation("cannot interpolate a NaN input"));
    }
    if input_range.len() != output_range.len() {
        return Err(ReelError::animation(format!(
            "input range ({}) and output range ({}) must have the same length",
            input_range.len(),
            output_range.len()
        )));
    }
    if input_range.len() < 2 {
        return Err(ReelError::animation(
            "input and output ranges must have at least 2 elements",
        ));
    }
    for (name, range) in [("input", input_range), ("output", output_range)] {
        if let Some(v) = range.iter().find(|v| !v.is_finite()) {
            return Err(ReelError::animation(format!(
                "{name} range must only contain finite numbers, got {v}"
            )));
        }
    }
    for w in input_range.windows(2) {
        if w[1] <= w[0] {
            return Err(ReelError::animation(format!(
                "input range must be strictly increasing, got {input_range:?}"
            )));
        }
    }
    Ok(())
}

fn find_segment(input: f64, input_range: &[f64]) -> usize {
    let mut i = 1;
    while i < input_range.len() - 1 {
        if input_range[i] >= input {
            break;
        }
        i += 1;
    }
    i - 1
}

fn interpolate_segment(
    input: f64,
    (in_min, in_max): (f64, f64),
    (out_min, out_max): (f64, f64),
    opts: InterpolateOpts,
) -> f64 {
    let mut x = input;

    if x < in_min {
        match opts.left {
            Extrapolate::Identity => return x,
            Extrapolate::Clamp => x = in_min,
            Extrapolate::Wrap => x = wrap(x, in_min, in_max),
            Extrapolate::Extend => {}
        }
    }
    if x > in_max {
        match opts.right {
            Extrapolate::Identity => return x,
            Extrapolate::Clamp => x = in_max,
            Extrapolate::Wrap => x = wrap(x, in_min, in_max),
            Extrapolate::Extend => {}
        }
    }

    if out_min == out_max {
        return out_min;
    }

    let t = opts.easing.eval((x - in_min) / (in_max - in_min));
    t * (out_max - out_min) + out_min
}

fn wrap(x: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    (x - min).rem_euclid(span) + min
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;
