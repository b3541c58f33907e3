use serde::{Deserialize, Serialize};

use crate::foundation::core::Vec2;
use crate::style::color::Color;

/// Color stop on a gradient line, `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient.
    pub offset: f64,
    /// Color at `offset`.
    pub color: Color,
}

/// Fill for a box background.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    /// Flat color.
    Solid {
        /// Fill color.
        color: Color,
    },
    /// CSS-style `linear-gradient(<angle>, ...)`; 0° points up, 90° points right.
    Linear {
        /// Gradient direction in degrees.
        angle_deg: f64,
        /// Color stops, sorted by offset.
        stops: Vec<GradientStop>,
    },
    /// CSS-style `radial-gradient(circle at x% y%, ...)` sized to the farthest corner.
    Radial {
        /// Center as a fraction of the box size.
        center: Vec2,
        /// Color stops, sorted by offset.
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// Flat fill.
    pub fn solid(color: Color) -> Self {
        Self::Solid { color }
    }

    /// Linear gradient with evenly spaced stops.
    pub fn linear(angle_deg: f64, colors: &[Color]) -> Self {
        Self::Linear {
            angle_deg,
            stops: even_stops(colors),
        }
    }

    /// Radial gradient with evenly spaced stops, centered at fractions `cx`, `cy` of the box.
    pub fn radial(cx: f64, cy: f64, colors: &[Color]) -> Self {
        Self::Radial {
            center: Vec2::new(cx, cy),
            stops: even_stops(colors),
        }
    }

    /// Radial gradient with explicit stops.
    pub fn radial_stops(cx: f64, cy: f64, stops: Vec<GradientStop>) -> Self {
        Self::Radial {
            center: Vec2::new(cx, cy),
            stops,
        }
    }

    /// Solid color when the paint is flat.
    pub fn as_solid(&self) -> Option<Color> {
        match self {
            Self::Solid { color } => Some(*color),
            _ => None,
        }
    }
}

fn even_stops(colors: &[Color]) -> Vec<GradientStop> {
    let last = colors.len().saturating_sub(1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, &color)| GradientStop {
            offset: i as f64 / last,
            color,
        })
        .collect()
}

/// Straight-alpha color at `t` along `stops`, clamping outside the first/last stop.
pub fn sample_stops(stops: &[GradientStop], t: f64) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for w in stops.windows(2) {
        let (a, b) = (w[0], w[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span <= 0.0 {
                1.0
            } else {
                (t - a.offset) / span
            };
            return mix(a.color, b.color, u);
        }
    }
    stops.last().map_or(Color::TRANSPARENT, |s| s.color)
}

// Interpolates in premultiplied space so fading to transparent does not darken.
fn mix(a: Color, b: Color, u: f64) -> Color {
    let aa = a.alpha();
    let ba = b.alpha();
    let alpha = aa + (ba - aa) * u;
    if alpha <= 0.0 {
        return Color::TRANSPARENT;
    }
    let ch = |ca: u8, cb: u8| -> u8 {
        let pa = f64::from(ca) * aa;
        let pb = f64::from(cb) * ba;
        ((pa + (pb - pa) * u) / alpha).round().clamp(0.0, 255.0) as u8
    };
    Color::rgba(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b), alpha)
}

/// Soft drop shadow behind a box, like CSS `box-shadow: 0 <dy> <blur> <color>`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Offset of the shadow from the box.
    pub offset: Vec2,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Shadow color.
    pub color: Color,
}

impl Shadow {
    /// Vertical drop shadow.
    pub fn drop(dy: f64, blur: f64, color: Color) -> Self {
        Self {
            offset: Vec2::new(0.0, dy),
            blur,
            color,
        }
    }

    /// Glow centered on the box.
    pub fn glow(blur: f64, color: Color) -> Self {
        Self::drop(0.0, blur, color)
    }
}

/// Solid border drawn inside the box edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// Stroke width in pixels.
    pub width: f64,
    /// Stroke color.
    pub color: Color,
}

#[cfg(test)]
#[path = "../../tests/unit/style/paint.rs"]
mod tests;
