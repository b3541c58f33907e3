use std::sync::Arc;

use crate::animation::spring::SpringConfig;
use crate::foundation::error::ReelResult;
use crate::foundation::math::round_half_up;
use crate::intro::config::IntroConfig;
use crate::intro::kit::{black, group_thousands, type_style, white};
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::color::Color;
use crate::style::node::Node;
use crate::style::paint::{Paint, Shadow};
use crate::style::style::{Align, Edges, Insets, TextAlign, pct, px};

const GRID_LINES: usize = 5;
const BARS_IN: f64 = 18.0;
const BAR_STAGGER: f64 = 4.0;
const CALLOUT_IN: f64 = 55.0;
const SWEEP_IN: f64 = 25.0;

/// Standalone gold price chart, every element placed absolutely from canvas-relative
/// metrics.
#[derive(Clone, Debug)]
pub struct GoldChart {
    cfg: Arc<IntroConfig>,
}

impl GoldChart {
    /// Chart of the configured data in the gold palette.
    pub fn new(cfg: Arc<IntroConfig>) -> Self {
        Self { cfg }
    }
}

/// Plot metrics shared by every element of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotMetrics {
    /// Outer padding.
    pub padding: f64,
    /// Title font size.
    pub title_size: f64,
    /// Axis and month label size.
    pub label_size: f64,
    /// Value label size.
    pub value_size: f64,
    /// Plot top edge, from the canvas top.
    pub top: f64,
    /// Plot width.
    pub width: f64,
    /// Plot height.
    pub height: f64,
    /// Gap between bars.
    pub gap: f64,
    /// Bar width.
    pub bar_w: f64,
}

impl PlotMetrics {
    /// Metrics for `bars` bars on the context's canvas.
    pub fn new(ctx: &SceneCtx<'_>, bars: usize) -> Self {
        let padding = ctx.rw(0.06, 44.0);
        let title_size = ctx.rw(0.055, 44.0);
        let label_size = ctx.rw(0.017, 16.0);
        let top = padding + round_half_up(title_size * 1.35);
        let bottom = ctx.h() - padding - round_half_up(label_size * 2.2);
        let width = (ctx.w() - padding * 2.0).max(1.0);
        let gap = round_half_up(width * 0.012).max(10.0);
        let n = bars.max(1) as f64;
        Self {
            padding,
            title_size,
            label_size,
            value_size: ctx.rw(0.018, 16.0),
            top,
            width,
            height: (bottom - top).max(1.0),
            gap,
            bar_w: ((width - gap * (n - 1.0)) / n).floor().max(14.0),
        }
    }
}

impl GoldChart {
    fn ambient(&self, ctx: &SceneCtx<'_>, fade_in: f64) -> Node {
        let pal = &self.cfg.gold_palette;
        let (w, h) = (ctx.w(), ctx.h());
        let disc = |inset: Insets, size: f64, paint: Paint| {
            Node::row()
                .absolute(inset)
                .size_px(size, size)
                .radius(9999.0)
                .background(paint)
        };
        Node::fill()
            .named("gold:ambient")
            .absolute(Insets::all(-120.0))
            .opacity(0.9 * fade_in)
            .child(disc(
                Insets::top_left(px(-h * 0.2), px(-w * 0.2)),
                w * 0.7,
                Paint::radial(
                    0.3,
                    0.3,
                    &[pal.gold_b.with_alpha(0.22), pal.gold_b.with_alpha(0.0)],
                ),
            ))
            .child(disc(
                Insets {
                    bottom: px(-h * 0.25),
                    right: px(-w * 0.25),
                    ..Insets::default()
                },
                w * 0.75,
                Paint::radial(
                    0.6,
                    0.6,
                    &[pal.gold_a.with_alpha(0.14), pal.gold_a.with_alpha(0.0)],
                ),
            ))
    }

    fn ticks(&self, m: &PlotMetrics, ctx: &SceneCtx<'_>, hi: f64, range: f64) -> Vec<Node> {
        let pal = &self.cfg.gold_palette;
        let mut out = Vec::with_capacity((GRID_LINES + 1) * 2);
        for i in 0..=GRID_LINES {
            let t = i as f64 / GRID_LINES as f64;
            let y = t * m.height;
            let edge = i == 0 || i == GRID_LINES;
            out.push(
                Node::row()
                    .named(format!("tick:{i}"))
                    .absolute(Insets {
                        top: px(y),
                        left: px(0.0),
                        right: px(0.0),
                        ..Insets::default()
                    })
                    .height(px(1.0))
                    .bg(if edge { pal.grid_strong } else { pal.grid })
                    .opacity(0.9),
            );
            let mut style = type_style(m.label_size, 650, -0.2, 1.2, white_text(0.55));
            style.align = TextAlign::End;
            out.push(
                Node::text(group_thousands(hi - t * range), style)
                    .named(format!("tick:{i}:label"))
                    .absolute(Insets::top_left(
                        px(y - round_half_up(m.label_size * 0.65)),
                        px(-ctx.rw(0.09, 90.0)),
                    ))
                    .width(px(ctx.rw(0.085, 86.0))),
            );
        }
        out
    }

    fn bar(
        &self,
        ctx: &SceneCtx<'_>,
        m: &PlotMetrics,
        i: usize,
        norm: f64,
        sweep: f64,
        is_max: bool,
    ) -> ReelResult<Vec<Node>> {
        let pal = &self.cfg.gold_palette;
        let value = self.cfg.chart.points[i].value;
        let label = &self.cfg.chart.points[i].label;
        let delay = BARS_IN + i as f64 * BAR_STAGGER;
        let bar_in = ctx.spring(delay, SpringConfig::new(16.0, 140.0, 0.9))?;
        let opacity = ctx.interp(&[delay - 8.0, delay + 10.0], &[0.0, 1.0])?;
        let h = (norm * m.height).max(6.0) * bar_in;
        let x = i as f64 * (m.bar_w + m.gap);
        let y = m.height - h;
        let highlight = if is_max {
            0.55
        } else {
            ctx.interp(&[0.0, 90.0], &[0.12, 0.18])?
        };

        let shine = Node::row()
            .named(format!("bar:{i}:shine"))
            .absolute(Insets::top_left(
                px(-m.height * 0.1),
                px(sweep * m.width - x - m.bar_w * 0.9),
            ))
            .size_px(m.bar_w * 1.2, m.height * 1.2)
            .background(Paint::linear(90.0, &[white(0.0), white(0.24), white(0.0)]))
            .rotate(18.0)
            .opacity(highlight);
        let body = Node::row()
            .named(format!("bar:{i}"))
            .absolute(Insets::top_left(px(y), px(x)))
            .size_px(m.bar_w, h)
            .radius(round_half_up(m.bar_w * 0.25).max(10.0))
            .background(Paint::linear(180.0, &[pal.gold_a, pal.gold_b]))
            .opacity(opacity)
            .shadow(Shadow::drop(18.0, 40.0, black(0.35)))
            .clip()
            .child(shine);

        let value_label = Node::text(
            group_thousands(value),
            type_style(m.value_size, 800, -0.3, 1.2, white_text(0.92)),
        )
        .named(format!("bar:{i}:value"))
        .absolute(Insets::top_left(
            px((y - round_half_up(m.value_size * 1.15)).max(0.0)),
            px(x + m.bar_w / 2.0),
        ))
        .translate_len(pct(-50.0), px((1.0 - bar_in) * 8.0))
        .opacity(ctx.interp(&[delay + 8.0, delay + 18.0], &[0.0, 1.0])?);

        let month = Node::text(
            label.clone(),
            type_style(m.label_size, 700, -0.2, 1.2, white_text(0.70)),
        )
        .named(format!("bar:{i}:month"))
        .absolute(Insets::top_left(
            px(m.height + round_half_up(m.label_size * 0.65)),
            px(x + m.bar_w / 2.0),
        ))
        .translate_len(pct(-50.0), px(0.0))
        .opacity(opacity);

        Ok(vec![body, value_label, month])
    }

    fn callout(&self, ctx: &SceneCtx<'_>, m: &PlotMetrics) -> ReelResult<Option<Node>> {
        let pal = &self.cfg.gold_palette;
        let Some(last) = self.cfg.chart.points.last() else {
            return Ok(None);
        };
        let appear = ctx.spring(CALLOUT_IN, SpringConfig::damped(18.0, 160.0))?;
        let size = ctx.rw(0.02, 18.0);
        Ok(Some(
            Node::row()
                .named("gold:callout")
                .absolute(Insets {
                    top: px(m.padding + round_half_up(m.title_size * 0.2)),
                    right: px(m.padding),
                    ..Insets::default()
                })
                .align(Align::Baseline)
                .gap(round_half_up(size * 0.28))
                .padding(Edges::xy(ctx.rh(0.012, 10.0), ctx.rw(0.016, 14.0)))
                .radius(999.0)
                .border(1.0, pal.gold_a.with_alpha(0.35))
                .background(Paint::linear(
                    135.0,
                    &[pal.gold_b.with_alpha(0.18), white_text(0.04)],
                ))
                .shadow(Shadow::drop(18.0, 44.0, black(0.35)))
                .translate(0.0, (1.0 - appear) * 10.0)
                .opacity(ctx.interp(&[CALLOUT_IN, CALLOUT_IN + 15.0], &[0.0, 1.0])?)
                .child(Node::text(
                    format!("{}:", last.label),
                    type_style(size, 700, -0.3, 1.2, white_text(0.70)),
                ))
                .child(Node::text(
                    group_thousands(last.value),
                    type_style(size, 800, -0.3, 1.2, pal.gold_a),
                )),
        ))
    }
}

fn white_text(alpha: f64) -> Color {
    Color::rgba(245, 247, 255, alpha)
}

impl Scene for GoldChart {
    fn name(&self) -> &str {
        "gold-chart"
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let pal = &self.cfg.gold_palette;
        let chart = &self.cfg.chart;
        let m = PlotMetrics::new(ctx, chart.points.len());
        let (lo, hi) = chart.bounds();
        let range = (hi - lo).max(1.0);
        let max_index = chart.max_index();

        let intro = ctx.spring(0.0, SpringConfig::new(14.0, 120.0, 0.9))?;
        let fade_in = ctx.interp(&[0.0, 18.0], &[0.0, 1.0])?;
        let sweep_end = SWEEP_IN + ctx.fps.as_f64() * 2.0;
        let sweep = ctx.interp(&[SWEEP_IN, sweep_end], &[-0.25, 1.25])?;

        let title = Node::column()
            .named("gold:title")
            .margin(Edges {
                bottom: round_half_up(m.title_size * 0.25),
                ..Edges::default()
            })
            .child(Node::text(
                chart.title.clone(),
                type_style(m.title_size, 900, -1.1, 1.05, pal.text),
            ))
            .child(
                Node::text(
                    chart.unit.clone(),
                    type_style(ctx.rw(0.02, 18.0), 650, 0.0, 1.2, pal.muted),
                )
                .margin(Edges {
                    top: 8.0,
                    ..Edges::default()
                }),
            );

        let mut bars = Vec::with_capacity(chart.points.len() * 3);
        for (i, p) in chart.points.iter().enumerate() {
            let norm = (p.value - lo) / range;
            bars.extend(self.bar(ctx, &m, i, norm, sweep, max_index == Some(i))?);
        }
        let plot = Node::row()
            .named("gold:plot")
            .absolute(Insets::top_left(px(m.top), px(m.padding)))
            .size_px(m.width, m.height)
            .children(self.ticks(&m, ctx, hi, range))
            .children(bars)
            .child(
                Node::row()
                    .named("gold:baseline")
                    .absolute(Insets {
                        left: px(0.0),
                        right: px(0.0),
                        bottom: px(0.0),
                        ..Insets::default()
                    })
                    .height(px(1.0))
                    .bg(pal.grid_strong),
            );

        let mut content = Node::fill()
            .named("gold:content")
            .padding(Edges::all(m.padding))
            .opacity(fade_in)
            .translate(0.0, (1.0 - intro) * 18.0)
            .child(title)
            .child(plot);
        if let Some(callout) = self.callout(ctx, &m)? {
            content = content.child(callout);
        }

        Ok(Node::fill()
            .named(self.name())
            .clip()
            .child(self.ambient(ctx, fade_in))
            .child(content))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/gold_chart.rs"]
mod tests;
