//! Small building blocks shared by the intro scenes.

use crate::foundation::math::round_half_up;
use crate::intro::config::LOGO_KEY;
use crate::scene::scene::SceneCtx;
use crate::style::color::Color;
use crate::style::node::Node;
use crate::style::paint::Paint;
use crate::style::style::{TextAlign, TextStyle, pct};

/// Typography shorthand: size, weight, letter spacing, line height and color.
pub(crate) fn type_style(
    size: f64,
    weight: u16,
    letter_spacing: f64,
    line_height: f64,
    color: Color,
) -> TextStyle {
    TextStyle {
        size,
        weight,
        letter_spacing,
        line_height,
        color,
        ..TextStyle::default()
    }
}

/// Same style, centered.
pub(crate) fn centered(ts: TextStyle) -> TextStyle {
    TextStyle {
        align: TextAlign::Center,
        ..ts
    }
}

/// White with alpha.
pub(crate) fn white(alpha: f64) -> Color {
    Color::rgba(255, 255, 255, alpha)
}

/// Black with alpha.
pub(crate) fn black(alpha: f64) -> Color {
    Color::rgba(0, 0, 0, alpha)
}

/// The logo image filling 78% of its box, or a monogram tile when no logo is loaded.
pub(crate) fn logo_mark(ctx: &SceneCtx<'_>, box_size: f64, name: &str, accent: Color) -> Node {
    if ctx.assets.has_image(LOGO_KEY) {
        return Node::image(LOGO_KEY)
            .named("logo")
            .size(pct(78.0), pct(78.0));
    }
    let tile = round_half_up(box_size * 0.78);
    let initial: String = name
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();
    Node::row()
        .named("logo:monogram")
        .size_px(tile, tile)
        .no_shrink()
        .center()
        .radius(round_half_up(tile * 0.24))
        .background(Paint::linear(135.0, &[accent, accent.with_alpha(0.35)]))
        .border(1.0, white(0.18))
        .child(Node::text(
            initial,
            type_style(round_half_up(tile * 0.5), 800, 0.0, 1.0, Color::WHITE),
        ))
}

/// Integer with `,` thousands separators, like `toLocaleString("en-US")`.
pub(crate) fn group_thousands(v: f64) -> String {
    let n = round_half_up(v) as i64;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Integer without separators.
pub(crate) fn plain_int(v: f64) -> String {
    format!("{}", round_half_up(v) as i64)
}

#[cfg(test)]
#[path = "../../tests/unit/intro/kit.rs"]
mod tests;
