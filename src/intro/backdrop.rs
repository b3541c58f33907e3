use std::sync::Arc;

use crate::foundation::error::ReelResult;
use crate::foundation::math::round_half_up;
use crate::intro::config::IntroConfig;
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::color::Color;
use crate::style::node::Node;
use crate::style::paint::Paint;
use crate::style::style::{Insets, Length, px};

/// Where the glow layer's edges sit relative to the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlowInset {
    /// Pushed out by the content padding, `max(48, round(w * 0.06))`.
    Padding,
    /// Fixed overscan, `max(160, round(min(w, h) * 0.18))`.
    Overscan,
}

/// Soft radial glows drifting across the whole sequence.
///
/// Fades in over the first 25 frames and parallax-drifts by 36 px horizontally and 28 px
/// vertically across `span` frames. The optional gold glow fades in over 40 frames.
#[derive(Clone, Debug)]
pub struct AmbientGlows {
    cfg: Arc<IntroConfig>,
    span: u64,
    inset: GlowInset,
    gold: bool,
}

impl AmbientGlows {
    /// Cyan and white glows drifting across `span` frames.
    pub fn new(cfg: Arc<IntroConfig>, span: u64, inset: GlowInset) -> Self {
        Self {
            cfg,
            span,
            inset,
            gold: false,
        }
    }

    /// Add the third, gold glow.
    pub fn with_gold(mut self) -> Self {
        self.gold = true;
        self
    }
}

impl Scene for AmbientGlows {
    fn name(&self) -> &str {
        "ambient-glows"
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let accent = self.cfg.palette.accent;
        let span = self.span.max(1) as f64;
        let opacity = ctx.interp(&[0.0, 25.0], &[0.0, 1.0])?;
        let dx = ctx.interp(&[0.0, span], &[-18.0, 18.0])?;
        let dy = ctx.interp(&[0.0, span], &[14.0, -14.0])?;
        let inset = -match self.inset {
            GlowInset::Padding => ctx.rw(0.06, 48.0),
            GlowInset::Overscan => round_half_up(ctx.w().min(ctx.h()) * 0.18).max(160.0),
        };

        let cyan = glow(
            Insets {
                top: px(-ctx.rh(0.2, 180.0)),
                left: px(-ctx.rw(0.2, 220.0)),
                ..Insets::default()
            },
            ctx.rw(0.55, 520.0),
            Paint::radial(0.3, 0.3, &[accent.with_alpha(0.22), accent.with_alpha(0.0)]),
        )
        .named("glow:accent");
        let white = glow(
            Insets {
                bottom: px(-ctx.rh(0.24, 220.0)),
                right: px(-ctx.rw(0.24, 260.0)),
                ..Insets::default()
            },
            ctx.rw(0.62, 620.0),
            Paint::radial(
                0.6,
                0.6,
                &[Color::rgba(255, 255, 255, 0.14), Color::rgba(255, 255, 255, 0.0)],
            ),
        )
        .named("glow:white");

        let mut layer = Node::fill()
            .named("ambient")
            .absolute(Insets::all(inset))
            .opacity(opacity)
            .translate(dx, dy)
            .child(cyan)
            .child(white);

        if self.gold {
            let gold = self.cfg.palette.gold;
            layer = layer.child(
                glow(
                    Insets {
                        top: px(round_half_up(ctx.h() * 0.18)),
                        right: px(round_half_up(ctx.w() * 0.1)),
                        ..Insets::default()
                    },
                    ctx.rw(0.44, 460.0),
                    Paint::radial(0.5, 0.45, &[gold.with_alpha(0.16), gold.with_alpha(0.0)]),
                )
                .named("glow:gold")
                .opacity(ctx.interp(&[0.0, 40.0], &[0.0, 1.0])?),
            );
        }
        Ok(layer)
    }
}

fn glow(inset: Insets, size: f64, paint: Paint) -> Node {
    Node::row()
        .absolute(inset)
        .size(Length::Px(size), Length::Px(size))
        .radius(9999.0)
        .background(paint)
}

#[cfg(test)]
#[path = "../../tests/unit/intro/backdrop.rs"]
mod tests;
