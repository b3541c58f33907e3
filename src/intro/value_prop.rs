use std::sync::Arc;

use crate::animation::spring::SpringConfig;
use crate::foundation::error::ReelResult;
use crate::foundation::math::round_half_up;
use crate::intro::config::IntroConfig;
use crate::intro::kit::{black, type_style, white};
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::node::Node;
use crate::style::paint::{GradientStop, Paint, Shadow};
use crate::style::style::{Align, Edges, Insets, Justify, pct, px};

const HEADLINE_IN: f64 = 10.0;
const CHIPS_IN: f64 = 22.0;
const CHIP_STAGGER: f64 = 5.0;
const CTA_IN: f64 = 34.0;
const SWEEP_START: f64 = 40.0;
const SWEEP_FRAMES: f64 = 22.0;

/// Scene 2: value headline, staggered feature chips and a pulsing CTA with a light sweep.
#[derive(Clone, Debug)]
pub struct ValueProp {
    cfg: Arc<IntroConfig>,
    card: bool,
}

impl ValueProp {
    /// Content on a translucent card.
    pub fn on_card(cfg: Arc<IntroConfig>) -> Self {
        Self { cfg, card: true }
    }

    /// Content without a card.
    pub fn clean(cfg: Arc<IntroConfig>) -> Self {
        Self { cfg, card: false }
    }

    fn chip(&self, ctx: &SceneCtx<'_>, i: usize, label: &str) -> ReelResult<Node> {
        let pal = &self.cfg.palette;
        let delay = CHIPS_IN + i as f64 * CHIP_STAGGER;
        let chip_in = ctx.spring(delay, SpringConfig::damped(18.0, 140.0))?;
        let opacity = ctx.interp(&[delay - 10.0, delay + 10.0], &[0.0, 1.0])?;
        let text_size = ctx.rw(0.018, 18.0);
        let dot = round_half_up(text_size * 0.6);

        Ok(Node::row()
            .named(format!("chip:{i}"))
            .align(Align::Center)
            .no_shrink()
            .padding(Edges::xy(ctx.rh(0.012, 10.0), ctx.rw(0.016, 14.0)))
            .radius(999.0)
            .bg(white(0.06))
            .border(1.0, white(0.12))
            .translate(0.0, (1.0 - chip_in) * ctx.rh(0.02, 16.0))
            .scale(0.98 + chip_in * 0.02)
            .opacity(opacity)
            .child(
                Node::row()
                    .named(format!("chip:{i}:dot"))
                    .size_px(dot, dot)
                    .no_shrink()
                    .radius(dot / 2.0)
                    .bg(pal.accent)
                    .margin(Edges {
                        right: 8.0,
                        ..Edges::default()
                    }),
            )
            .child(Node::text(
                label.to_owned(),
                type_style(text_size, 600, 0.0, 1.2, pal.text),
            )))
    }

    fn cta(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let pal = &self.cfg.palette;
        let cta_in = ctx.spring(CTA_IN, SpringConfig::damped(14.0, 180.0))?;
        let opacity = ctx.interp(&[CTA_IN - 10.0, CTA_IN + 10.0], &[0.0, 1.0])?;
        let pulse = ctx.interp(
            &[CTA_IN + 10.0, CTA_IN + 18.0, CTA_IN + 28.0],
            &[1.0, 1.05, 1.0],
        )?;
        let sweep_x = ctx.interp(
            &[SWEEP_START, SWEEP_START + SWEEP_FRAMES],
            &[-ctx.rw(0.24, 260.0), ctx.rw(0.9, 900.0)],
        )?;
        let sweep_opacity = ctx.interp(
            &[SWEEP_START, SWEEP_START + 8.0, SWEEP_START + SWEEP_FRAMES],
            &[0.0, 1.0, 0.0],
        )?;

        let sweep = Node::row()
            .named("cta:sweep")
            .absolute(Insets::top_left(px(-ctx.rh(0.04, 30.0)), px(sweep_x)))
            .size_px(ctx.rw(0.12, 140.0), ctx.rh(0.22, 180.0))
            .background(Paint::Linear {
                angle_deg: 90.0,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: white(0.0),
                    },
                    GradientStop {
                        offset: 0.5,
                        color: white(0.20),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: white(0.0),
                    },
                ],
            })
            .rotate(18.0)
            .opacity(sweep_opacity);

        let button = Node::row()
            .named("cta:button")
            .center()
            .padding(Edges::xy(ctx.rh(0.016, 12.0), ctx.rw(0.02, 18.0)))
            .radius(ctx.rw(0.014, 14.0))
            .background(Paint::linear(
                135.0,
                &[pal.accent.with_alpha(0.25), white(0.06)],
            ))
            .border(1.0, pal.accent.with_alpha(0.35))
            .shadow(Shadow::drop(16.0, 40.0, black(0.35)))
            .translate(0.0, (1.0 - cta_in) * ctx.rh(0.028, 18.0))
            .scale(pulse)
            .opacity(opacity)
            .clip()
            .child(sweep)
            .child(Node::text(
                self.cfg.copy.cta.clone(),
                type_style(ctx.rw(0.02, 20.0), 800, -0.2, 1.2, pal.text),
            ));

        Ok(Node::row()
            .margin(Edges {
                top: ctx.rh(0.008, 6.0),
                ..Edges::default()
            })
            .align(Align::Center)
            .justify(Justify::Start)
            .child(button))
    }
}

impl Scene for ValueProp {
    fn name(&self) -> &str {
        if self.card {
            "value-prop-card"
        } else {
            "value-prop"
        }
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let pal = &self.cfg.palette;

        let headline_in = ctx.spring(HEADLINE_IN, SpringConfig::damped(18.0, 130.0))?;
        let chips_in = ctx.spring(CHIPS_IN, SpringConfig::damped(18.0, 120.0))?;
        let headline_opacity = ctx.interp(&[HEADLINE_IN - 10.0, HEADLINE_IN + 10.0], &[0.0, 1.0])?;
        let chips_opacity = ctx.interp(&[CHIPS_IN - 10.0, CHIPS_IN + 10.0], &[0.0, 1.0])?;

        let headline = Node::text(
            self.cfg.copy.value_line.clone(),
            type_style(ctx.rw(0.026, 26.0), 700, -0.4, 1.2, pal.text),
        )
        .named("value:headline")
        .max_width(px(ctx.rw(0.72, 640.0)))
        .translate(0.0, (1.0 - headline_in) * ctx.rh(0.04, 26.0))
        .opacity(headline_opacity);

        let mut chips = Node::row()
            .named("value:chips")
            .gap(ctx.rw(0.012, 12.0))
            .wrap()
            .align(Align::Center)
            .translate(0.0, (1.0 - chips_in) * ctx.rh(0.03, 22.0))
            .opacity(chips_opacity);
        for (i, label) in self.cfg.copy.chips.iter().enumerate() {
            chips = chips.child(self.chip(ctx, i, label)?);
        }

        let stack = Node::column()
            .gap(ctx.rw(0.018, 18.0))
            .child(headline)
            .child(chips)
            .child(self.cta(ctx)?);

        let max_content = px(ctx.rw(0.82, 900.0));
        let body = if self.card {
            Node::column()
                .named("value:card")
                .width(pct(100.0))
                .max_width(max_content)
                .radius(ctx.rw(0.02, 24.0))
                .padding(Edges::xy(ctx.rh(0.05, 28.0), ctx.rw(0.04, 26.0)))
                .bg(pal.card)
                .border(1.0, white(0.10))
                .shadow(Shadow::drop(20.0, 70.0, black(0.35)))
                .child(stack)
        } else {
            stack.width(pct(100.0)).max_width(max_content)
        };

        Ok(Node::fill()
            .named(self.name())
            .padding(Edges::all(ctx.rw(0.06, 48.0)))
            .center()
            .child(body))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/value_prop.rs"]
mod tests;
