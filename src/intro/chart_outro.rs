use std::sync::Arc;

use crate::animation::spring::SpringConfig;
use crate::foundation::error::ReelResult;
use crate::foundation::math::round_half_up;
use crate::intro::config::{IntroConfig, LOGO_KEY};
use crate::intro::kit::{centered, group_thousands, logo_mark, type_style, white};
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::node::Node;
use crate::style::paint::{GradientStop, Paint, Shadow};
use crate::style::style::{Align, Edges, Insets, Justify, TextAlign, TextStyle, pct, px};

const CHART_IN: f64 = 10.0;
const BARS_IN: f64 = 16.0;
const STAGGER: f64 = 4.0;
const VALUE_DELAY: f64 = 10.0;
const SWEEP_IN: f64 = 24.0;
const AXIS_STEPS: usize = 5;
const INSIDE_LABEL_MIN: f64 = 34.0;

/// Gold price chart with an axis column and sweep marker, then a logo outro over the
/// last frames while the chart fades out.
#[derive(Clone, Debug)]
pub struct ChartOutro {
    cfg: Arc<IntroConfig>,
}

impl ChartOutro {
    /// Chart of the configured data followed by the configured outro copy.
    pub fn new(cfg: Arc<IntroConfig>) -> Self {
        Self { cfg }
    }

    /// Axis bounds: the data range padded by `max(40, 12%)` and widened to multiples of 50.
    pub fn value_range(&self) -> (f64, f64) {
        let (lo, hi) = self.cfg.chart.bounds();
        let pad = round_half_up((hi - lo) * 0.12).max(40.0);
        let min = ((lo - pad) / 50.0).floor() * 50.0;
        let max = ((hi + pad) / 50.0).ceil() * 50.0;
        (min, max)
    }

    /// First frame of the outro.
    pub fn outro_start(&self, ctx: &SceneCtx<'_>) -> u64 {
        ctx.duration.saturating_sub(self.cfg.timings.outro)
    }

    fn header(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let pal = &self.cfg.outro_palette;
        let header_in = ctx.spring(0.0, SpringConfig::new(16.0, 160.0, 0.9))?;
        Ok(Node::column()
            .named("chart:header")
            .height(px(ctx.rh(0.14, 86.0)))
            .justify(Justify::Center)
            .translate(0.0, (1.0 - header_in) * 12.0)
            .opacity(header_in)
            .child(Node::text(
                self.cfg.chart.title.clone(),
                type_style(ctx.rw(0.034, 28.0), 750, -0.6, 1.05, pal.text),
            ))
            .child(
                Node::text(
                    self.cfg.chart.unit.clone(),
                    type_style(ctx.rw(0.016, 14.0), 500, 0.0, 1.2, pal.muted),
                )
                .margin(Edges {
                    top: ctx.rh(0.006, 6.0),
                    ..Edges::default()
                }),
            ))
    }

    fn bar(&self, ctx: &SceneCtx<'_>, i: usize, norm: f64, chart_h: f64) -> ReelResult<Node> {
        let pal = &self.cfg.outro_palette;
        let value = self.cfg.chart.points[i].value;
        let delay = BARS_IN + i as f64 * STAGGER;
        let bar_in = ctx.spring(delay, SpringConfig::new(16.0, 120.0, 0.9))?;
        let bar_h = (norm * (chart_h - 8.0)).max(2.0) * bar_in;
        let lift = (1.0 - bar_in.clamp(0.0, 1.0)) * 10.0;
        let value_opacity = ctx.interp(
            &[delay + VALUE_DELAY, delay + VALUE_DELAY + 10.0],
            &[0.0, 1.0],
        )?;
        let shimmer = ctx.interp(&[delay + 18.0, delay + 40.0], &[0.0, 1.0])?;
        let sheen_x = -0.2 + shimmer * 1.4;

        let sheen = Node::row()
            .named(format!("bar:{i}:sheen"))
            .absolute(Insets {
                top: px(0.0),
                bottom: px(0.0),
                left: pct(sheen_x * 100.0),
                ..Insets::default()
            })
            .width(pct(38.0))
            .translate_len(pct(-50.0), px(0.0))
            .background(Paint::Linear {
                angle_deg: 90.0,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: white(0.0),
                    },
                    GradientStop {
                        offset: 0.5,
                        color: white(0.22),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: white(0.0),
                    },
                ],
            })
            .opacity(bar_in.clamp(0.0, 1.0));

        let inside = bar_h > INSIDE_LABEL_MIN;
        let (top, color) = if inside {
            (10.0, pal.background)
        } else {
            (-ctx.rh(0.02, 18.0), pal.text)
        };
        let mut label_style = type_style(ctx.rw(0.012, 11.0), 800, 0.2, 1.2, color);
        label_style.align = TextAlign::Center;
        let label = Node::text(group_thousands(value), label_style)
            .named(format!("bar:{i}:value"))
            .absolute(Insets {
                top: px(top),
                left: px(0.0),
                right: px(0.0),
                ..Insets::default()
            })
            .opacity(value_opacity);

        let body = Node::row()
            .named(format!("bar:{i}"))
            .height(px(bar_h.max(2.0)))
            .translate(0.0, lift)
            .bg(pal.bar)
            .radius(ctx.rw(0.01, 8.0))
            .shadow(Shadow::drop(10.0, 30.0, pal.bar.with_alpha(34.0 / 255.0)))
            .clip()
            .child(sheen)
            .child(label);

        Ok(Node::column()
            .width(px(0.0))
            .grow(1.0)
            .height(pct(100.0))
            .justify(Justify::End)
            .child(body))
    }

    fn plot(
        &self,
        ctx: &SceneCtx<'_>,
        chart_h: f64,
        x_row: f64,
        grid_lines: usize,
    ) -> ReelResult<Node> {
        let pal = &self.cfg.outro_palette;
        let (min, max) = self.value_range();
        let inner_pad = ctx.rw(0.008, 10.0);
        let bar_gap = ctx.rw(0.01, 8.0);

        let grid = Node::column()
            .named("chart:grid")
            .absolute(Insets::fill())
            .justify(Justify::SpaceBetween)
            .padding(Edges {
                left: inner_pad,
                ..Edges::default()
            })
            .children((0..grid_lines).map(|idx| {
                let line = Node::row()
                    .named(format!("grid:{idx}"))
                    .width(pct(100.0))
                    .opacity(0.65);
                if idx == 0 {
                    line.height(px(0.0))
                } else {
                    line.height(px(1.0)).bg(pal.axis)
                }
            }));

        let sweep = ctx.spring(SWEEP_IN, SpringConfig::new(16.0, 120.0, 1.0))?;
        let sweep_x = sweep.clamp(0.0, 1.0);
        let marker = Node::row()
            .named("chart:sweep")
            .absolute(Insets {
                top: px(0.0),
                bottom: px(0.0),
                left: px(0.0),
                ..Insets::default()
            })
            .width(pct(100.0))
            .opacity(ctx.interp(&[SWEEP_IN, SWEEP_IN + 18.0], &[0.0, 1.0])?)
            .child(
                Node::row()
                    .named("chart:sweep-line")
                    .absolute(Insets {
                        top: px(0.0),
                        bottom: px(0.0),
                        left: pct(round_half_up(sweep_x * 100.0)),
                        ..Insets::default()
                    })
                    .width(px(2.0))
                    .translate(-1.0, 0.0)
                    .bg(pal.bar.with_alpha(170.0 / 255.0))
                    .shadow(Shadow::glow(16.0, pal.bar.with_alpha(85.0 / 255.0))),
            );

        let span = (max - min).max(1.0);
        let bars = self
            .cfg
            .chart
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| self.bar(ctx, i, (p.value - min) / span, chart_h))
            .collect::<ReelResult<Vec<_>>>()?;
        let bar_row = Node::row()
            .named("chart:bars")
            .absolute(Insets::fill())
            .padding(Edges {
                left: inner_pad,
                right: inner_pad,
                ..Edges::default()
            })
            .align(Align::End)
            .gap(bar_gap)
            .children(bars);

        let axis_line = |inset: Insets| Node::row().absolute(inset).bg(pal.axis);
        let region = Node::row()
            .named("chart:region")
            .width(pct(100.0))
            .height(px(chart_h))
            .no_shrink()
            .clip()
            .child(grid)
            .child(marker)
            .child(bar_row)
            .child(
                axis_line(Insets {
                    top: px(0.0),
                    bottom: px(0.0),
                    left: px(0.0),
                    ..Insets::default()
                })
                .width(px(1.0)),
            )
            .child(
                axis_line(Insets {
                    left: px(0.0),
                    right: px(0.0),
                    bottom: px(0.0),
                    ..Insets::default()
                })
                .height(px(1.0)),
            );

        let mut labels = Vec::with_capacity(self.cfg.chart.points.len());
        for (i, p) in self.cfg.chart.points.iter().enumerate() {
            let delay = BARS_IN + i as f64 * STAGGER + 6.0;
            let label_in = ctx.spring(delay, SpringConfig::new(20.0, 220.0, 0.7))?;
            let style = TextStyle {
                uppercase: true,
                ..centered(type_style(ctx.rw(0.012, 11.0), 700, 0.6, 1.2, pal.muted))
            };
            labels.push(
                Node::text(p.label.clone(), style)
                    .named(format!("month:{i}"))
                    .width(px(0.0))
                    .grow(1.0)
                    .translate(0.0, (1.0 - label_in) * 6.0)
                    .opacity(label_in),
            );
        }
        let x_labels = Node::row()
            .named("chart:x-labels")
            .width(pct(100.0))
            .height(px(x_row))
            .align(Align::End)
            .padding(Edges {
                left: inner_pad,
                right: inner_pad,
                ..Edges::default()
            })
            .gap(bar_gap)
            .children(labels);

        Ok(Node::column()
            .named("chart:plot")
            .width(px(self.plot_width(ctx)))
            .height(px(chart_h + x_row))
            .no_shrink()
            .child(region)
            .child(x_labels))
    }

    fn plot_width(&self, ctx: &SceneCtx<'_>) -> f64 {
        let side = ctx.rw(0.055, 40.0) * 2.0;
        (ctx.w() - side - ctx.rw(0.065, 52.0) - ctx.rw(0.012, 14.0)).max(0.0)
    }

    fn outro(&self, ctx: &SceneCtx<'_>, start: f64) -> ReelResult<Node> {
        let pal = &self.cfg.outro_palette;
        let copy = &self.cfg.outro;
        let outro_in = ctx.spring(start, SpringConfig::new(18.0, 140.0, 0.9))?;
        let opacity = ctx.interp(&[start, start + 10.0], &[0.0, 1.0])?;
        let scale = 0.96 + outro_in.clamp(0.0, 1.0) * 0.04;
        let logo_w = ctx.rw(0.11, 84.0);

        let logo = if ctx.assets.has_image(LOGO_KEY) {
            Node::image(LOGO_KEY).width(px(logo_w))
        } else {
            logo_mark(ctx, logo_w, &copy.name, pal.bar)
        };

        Ok(Node::fill()
            .named("outro")
            .center()
            .opacity(opacity)
            .scale(scale)
            .child(
                Node::column()
                    .align(Align::Center)
                    .gap(ctx.rh(0.012, 10.0))
                    .child(logo.named("outro:logo").opacity(outro_in))
                    .child(
                        Node::text(
                            copy.name.clone(),
                            centered(type_style(ctx.rw(0.05, 34.0), 850, -0.8, 1.05, pal.text)),
                        )
                        .named("outro:name"),
                    )
                    .child(
                        Node::text(
                            copy.tagline.clone(),
                            centered(type_style(ctx.rw(0.022, 16.0), 600, 0.2, 1.2, pal.muted)),
                        )
                        .named("outro:tagline")
                        .max_width(px(round_half_up(ctx.w() * 0.75))),
                    ),
            ))
    }
}

impl Scene for ChartOutro {
    fn name(&self) -> &str {
        "chart-outro"
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let pal = &self.cfg.outro_palette;
        let pad_x = ctx.rw(0.055, 40.0);
        let pad_y = ctx.rh(0.06, 36.0);
        let header_h = ctx.rh(0.14, 86.0);
        let chart_h = (ctx.h() - pad_y * 2.0 - header_h - ctx.rh(0.01, 10.0)).max(1.0);
        let x_row = ctx.rh(0.06, 38.0);
        let axis_w = ctx.rw(0.065, 52.0);

        let (min, max) = self.value_range();
        let step = (max - min) / AXIS_STEPS as f64;
        let axis: Vec<f64> = (0..=AXIS_STEPS)
            .rev()
            .map(|i| round_half_up(min + i as f64 * step))
            .collect();

        let chart_in = ctx.spring(CHART_IN, SpringConfig::new(18.0, 140.0, 0.9))?;
        let chart_opacity = ctx.interp(&[CHART_IN, CHART_IN + 14.0], &[0.0, 1.0])?;

        let mut axis_style = type_style(ctx.rw(0.013, 12.0), 600, 0.0, 1.0, pal.muted);
        axis_style.align = TextAlign::End;
        let y_axis = Node::column()
            .named("chart:y-axis")
            .width(px(axis_w))
            .height(px(chart_h + x_row))
            .no_shrink()
            .justify(Justify::SpaceBetween)
            .padding(Edges {
                bottom: x_row,
                ..Edges::default()
            })
            .children(axis.iter().enumerate().map(|(i, v)| {
                Node::text(group_thousands(*v), axis_style)
                    .named(format!("axis:{i}"))
                    .opacity(0.95)
            }));

        let chart = Node::row()
            .named("chart:body")
            .gap(ctx.rw(0.012, 14.0))
            .opacity(chart_opacity)
            .translate(0.0, (1.0 - chart_in) * 10.0)
            .child(y_axis)
            .child(self.plot(ctx, chart_h, x_row, axis.len())?);

        let start = self.outro_start(ctx) as f64;
        let fade_out = ctx.interp(&[(start - 10.0).max(0.0), start + 6.0], &[1.0, 0.0])?;
        let chart_layer = Node::column()
            .named("chart")
            .opacity(fade_out)
            .child(self.header(ctx)?)
            .child(chart);

        Ok(Node::fill()
            .named(self.name())
            .padding(Edges::xy(pad_y, pad_x))
            .child(chart_layer)
            .child(self.outro(ctx, start)?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/chart_outro.rs"]
mod tests;
