use std::sync::Arc;

use crate::animation::spring::SpringConfig;
use crate::foundation::error::ReelResult;
use crate::foundation::math::round_half_up;
use crate::intro::config::IntroConfig;
use crate::intro::kit::{black, plain_int, type_style, white};
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::node::Node;
use crate::style::paint::{GradientStop, Paint, Shadow};
use crate::style::style::{Align, Edges, Insets, Justify, Length, pct, px};

const GRID_LINES: usize = 4;
const BAR_STAGGER: f64 = 3.0;
const BARS_IN: f64 = 14.0;

/// Scene 4: animated monthly histogram with a moving highlight and a price tag.
///
/// Bars grow from the baseline with a 3-frame stagger. A cursor walks across the bars
/// between frame 18 and `min(duration - 24, 120)`; the bar under it is tinted, pulses
/// and carries a price tag.
#[derive(Clone, Debug)]
pub struct Histogram {
    cfg: Arc<IntroConfig>,
}

impl Histogram {
    /// Histogram of the configured chart data.
    pub fn new(cfg: Arc<IntroConfig>) -> Self {
        Self { cfg }
    }
}

struct Geometry {
    chart_w: f64,
    chart_h: f64,
    bar_gap: f64,
    bar_w: f64,
    small_text: f64,
}

impl Geometry {
    fn new(ctx: &SceneCtx<'_>, bars: usize) -> Self {
        let padding = ctx.rw(0.06, 48.0);
        let chart_w = ctx.rw(0.9, 980.0).min(ctx.w() - padding * 2.0).max(0.0);
        let chart_h = ctx.rh(0.42, 360.0);
        let bar_gap = round_half_up(chart_w * 0.008).max(8.0);
        let n = bars.max(1) as f64;
        let bar_w = ((chart_w - bar_gap * (n - 1.0)) / n).floor().max(0.0);
        Self {
            chart_w,
            chart_h,
            bar_gap,
            bar_w,
            small_text: ctx.rw(0.012, 12.0),
        }
    }
}

impl Histogram {
    /// Index of the highlighted bar at the current frame.
    pub fn cursor(&self, ctx: &SceneCtx<'_>) -> ReelResult<usize> {
        let n = self.cfg.chart.points.len();
        if n == 0 {
            return Ok(0);
        }
        let end = (ctx.duration.saturating_sub(24).min(120) as f64).max(19.0);
        let idx = ctx.interp(&[18.0, end], &[0.0, (n - 1) as f64])?;
        Ok(idx.floor() as usize)
    }

    fn grid(&self, g: &Geometry, hi: f64, span: f64) -> Vec<Node> {
        let pal = &self.cfg.palette;
        (0..=GRID_LINES)
            .map(|i| {
                let t = i as f64 / GRID_LINES as f64;
                let y = round_half_up(t * (g.chart_h - 1.0));
                Node::row()
                    .named(format!("grid:{i}"))
                    .absolute(Insets {
                        top: px(y),
                        left: px(0.0),
                        right: px(0.0),
                        ..Insets::default()
                    })
                    .height(px(1.0))
                    .bg(white(0.08))
                    .child(
                        Node::text(
                            plain_int(hi - t * span),
                            type_style(g.small_text, 650, 0.2, 1.2, pal.text.with_alpha(0.55)),
                        )
                        .named(format!("grid:{i}:label"))
                        .absolute(Insets::top_left(px(-12.0), px(12.0))),
                    )
            })
            .collect()
    }

    fn bar(
        &self,
        ctx: &SceneCtx<'_>,
        g: &Geometry,
        i: usize,
        norm: f64,
        active: Option<f64>,
    ) -> ReelResult<Node> {
        let pal = &self.cfg.palette;
        let point = &self.cfg.chart.points[i];
        let appear = BARS_IN + i as f64 * BAR_STAGGER;
        let bar_in = ctx.spring(appear, SpringConfig::new(16.0, 130.0, 0.9))?;
        let target = round_half_up(norm * (g.chart_h - 84.0)).max(8.0);
        let h = target * bar_in;
        let is_active = active.is_some();

        let sheen_x = ctx.interp(
            &[appear + 10.0, appear + 26.0],
            &[-g.bar_w * 1.2, g.bar_w * 1.2],
        )?;
        let sheen = Node::row()
            .absolute(Insets::fill())
            .background(Paint::linear(90.0, &[white(0.0), white(0.16), white(0.0)]))
            .translate(sheen_x, 0.0)
            .opacity(if is_active { 0.7 } else { 0.25 });

        let body = Node::row()
            .named(format!("bar:{i}:body"))
            .width(pct(100.0))
            .height(px(h.max(2.0)))
            .radius(12.0)
            .background(if is_active {
                Paint::linear(180.0, &[white(0.22), pal.gold])
            } else {
                Paint::linear(180.0, &[white(0.14), pal.gold.with_alpha(0.8)])
            })
            .shadow(if is_active {
                Shadow::drop(18.0, 40.0, pal.gold_soft)
            } else {
                Shadow::drop(10.0, 26.0, black(0.25))
            })
            .border(1.0, white(0.12))
            .clip()
            .child(sheen);

        let label_color = if is_active {
            pal.gold.with_alpha(0.95)
        } else {
            pal.text.with_alpha(0.70)
        };
        let label = Node::text(
            point.label.clone(),
            type_style(g.small_text, 700, 0.2, 1.2, label_color),
        )
        .named(format!("bar:{i}:label"))
        .opacity(ctx.interp(&[appear + 6.0, appear + 18.0], &[0.0, 1.0])?);

        let mut column = Node::column()
            .named(format!("bar:{i}"))
            .no_shrink()
            .width(px(g.bar_w))
            .align(Align::Center)
            .justify(Justify::End)
            .gap(10.0)
            .scale(active.unwrap_or(1.0))
            .origin(pct(50.0), pct(100.0))
            .child(body)
            .child(label);

        if is_active {
            let tag = Node::row()
                .named("histogram:price")
                .absolute(Insets {
                    bottom: px(0.0),
                    ..Insets::default()
                })
                .translate(0.0, -(h + 12.0).max(10.0))
                .padding(Edges::xy(8.0, 10.0))
                .radius(12.0)
                .bg(pal.background.with_alpha(0.85))
                .border(1.0, white(0.10))
                .shadow(Shadow::drop(18.0, 40.0, black(0.35)))
                .opacity(ctx.interp(&[appear + 10.0, appear + 22.0], &[0.0, 1.0])?)
                .child(Node::text(
                    plain_int(point.value),
                    type_style(ctx.rw(0.014, 14.0), 800, -0.2, 1.2, pal.text),
                ));
            column = column.child(tag);
        }
        Ok(column)
    }
}

impl Scene for Histogram {
    fn name(&self) -> &str {
        "histogram"
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let pal = &self.cfg.palette;
        let chart = &self.cfg.chart;
        let g = Geometry::new(ctx, chart.points.len());
        let (lo, hi) = chart.bounds();
        let span = (hi - lo).max(1.0);

        let intro = ctx.spring(6.0, SpringConfig::new(16.0, 140.0, 0.9))?;
        let title_opacity = ctx.interp(&[0.0, 18.0], &[0.0, 1.0])?;
        let chart_opacity = ctx.interp(&[10.0, 28.0], &[0.0, 1.0])?;
        let shift = (1.0 - intro) * ctx.rh(0.03, 18.0);
        let cursor = self.cursor(ctx)?;
        let pulse = ctx.interp(&[40.0, 54.0, 70.0], &[1.0, 1.06, 1.0])?;

        let title = Node::column()
            .named("histogram:title")
            .opacity(title_opacity)
            .child(Node::text(
                chart.title.clone(),
                type_style(ctx.rw(0.05, 44.0), 900, -1.0, 1.05, pal.text),
            ))
            .child(
                Node::text(
                    chart.unit.clone(),
                    type_style(ctx.rw(0.018, 18.0), 650, 0.0, 1.2, pal.muted),
                )
                .margin(Edges {
                    top: 6.0,
                    ..Edges::default()
                }),
            );

        let glow = Node::row()
            .absolute(Insets::all(-40.0))
            .background(Paint::radial_stops(
                0.35,
                0.35,
                vec![
                    GradientStop {
                        offset: 0.0,
                        color: pal.gold.with_alpha(0.18),
                    },
                    GradientStop {
                        offset: 0.55,
                        color: pal.gold.with_alpha(0.0),
                    },
                ],
            ));

        let bars = chart
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let active = (i == cursor).then_some(pulse);
                self.bar(ctx, &g, i, (p.value - lo) / span, active)
            })
            .collect::<ReelResult<Vec<_>>>()?;
        let bar_row = Node::row()
            .named("histogram:bars")
            .absolute(Insets {
                top: px(18.0),
                right: px(18.0),
                bottom: px(22.0),
                left: px(18.0),
            })
            .align(Align::End)
            .gap(g.bar_gap)
            .children(bars);

        let footer = Node::row()
            .named("histogram:footer")
            .absolute(Insets {
                right: px(16.0),
                bottom: px(10.0),
                left: px(16.0),
                ..Insets::default()
            })
            .justify(Justify::SpaceBetween)
            .align(Align::Center)
            .child(Node::text(
                chart.footnote.clone(),
                type_style(g.small_text, 650, 0.0, 1.2, pal.text.with_alpha(0.55)),
            ))
            .child(
                Node::text(
                    format!("Peak: {}", plain_int(hi)),
                    type_style(g.small_text, 800, 0.2, 1.2, pal.gold.with_alpha(0.8)),
                )
                .named("histogram:peak")
                .opacity(ctx.interp(&[40.0, 56.0], &[0.0, 1.0])?),
            );

        let plot = Node::row()
            .named("histogram:chart")
            .size(Length::Px(g.chart_w), Length::Px(g.chart_h))
            .no_shrink()
            .opacity(chart_opacity)
            .radius(18.0)
            .background(Paint::linear(180.0, &[white(0.05), white(0.02)]))
            .border(1.0, white(0.08))
            .shadow(Shadow::drop(22.0, 60.0, black(0.35)))
            .clip()
            .child(glow)
            .children(self.grid(&g, hi, span))
            .child(bar_row)
            .child(footer);

        let stack = Node::column()
            .named("histogram:stack")
            .width(pct(100.0))
            .max_width(px(ctx.rw(0.92, 1040.0)))
            .gap(ctx.rh(0.018, 14.0))
            .translate(0.0, shift)
            .child(title)
            .child(plot);

        Ok(Node::fill()
            .named(self.name())
            .padding(Edges::all(ctx.rw(0.06, 48.0)))
            .center()
            .child(stack))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/histogram.rs"]
mod tests;
