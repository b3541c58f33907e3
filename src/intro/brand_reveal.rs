use std::sync::Arc;

use crate::animation::spring::SpringConfig;
use crate::foundation::error::ReelResult;
use crate::intro::config::IntroConfig;
use crate::intro::kit::{black, logo_mark, type_style, white};
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::node::Node;
use crate::style::paint::{Paint, Shadow};
use crate::style::style::{Align, Edges, pct, px};

const LOGO_IN: f64 = 6.0;
const NAME_IN: f64 = 14.0;
const TAGLINE_IN: f64 = 26.0;

/// Scene 1: logo pops in, then the app name with a growing underline, then the tagline.
///
/// With `card` the content sits on a translucent card that lifts into place.
#[derive(Clone, Debug)]
pub struct BrandReveal {
    cfg: Arc<IntroConfig>,
    card: bool,
}

impl BrandReveal {
    /// Brand reveal on a lifted card.
    pub fn on_card(cfg: Arc<IntroConfig>) -> Self {
        Self { cfg, card: true }
    }

    /// Brand reveal without a card.
    pub fn clean(cfg: Arc<IntroConfig>) -> Self {
        Self { cfg, card: false }
    }
}

impl Scene for BrandReveal {
    fn name(&self) -> &str {
        if self.card {
            "brand-reveal-card"
        } else {
            "brand-reveal"
        }
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let pal = &self.cfg.palette;
        let copy = &self.cfg.copy;

        let logo_in = ctx.spring(LOGO_IN, SpringConfig::new(14.0, 180.0, 0.8))?;
        let name_in = ctx.spring(NAME_IN, SpringConfig::new(16.0, 160.0, 0.9))?;
        let tagline_in = ctx.spring(TAGLINE_IN, SpringConfig::new(18.0, 140.0, 1.0))?;
        let underline = ctx.spring(NAME_IN + 10.0, SpringConfig::damped(20.0, 160.0))?;

        let logo_opacity = ctx.interp(&[LOGO_IN - 8.0, LOGO_IN + 6.0], &[0.0, 1.0])?;
        let name_opacity = ctx.interp(&[NAME_IN - 10.0, NAME_IN + 8.0], &[0.0, 1.0])?;
        let tagline_opacity = ctx.interp(&[TAGLINE_IN - 10.0, TAGLINE_IN + 10.0], &[0.0, 1.0])?;

        let logo_y = (1.0 - logo_in) * ctx.rh(0.05, 30.0);
        let name_y = (1.0 - name_in) * ctx.rh(0.035, 22.0);
        let tagline_y = (1.0 - tagline_in) * ctx.rh(0.03, 18.0);
        let logo_scale = 0.88 + logo_in * 0.12;

        let logo_size = ctx.rw(0.12, 88.0);
        let logo = Node::row()
            .named("brand:logo")
            .size_px(logo_size, logo_size)
            .no_shrink()
            .center()
            .translate(0.0, logo_y)
            .scale(logo_scale)
            .opacity(logo_opacity)
            .child(logo_mark(ctx, logo_size, &copy.app_name, pal.accent));

        let name = Node::text(
            copy.app_name.clone(),
            type_style(ctx.rw(0.06, 54.0), 800, -1.2, 1.05, pal.text),
        )
        .named("brand:name")
        .translate(0.0, name_y)
        .opacity(name_opacity);

        let underline = Node::row()
            .named("brand:underline")
            .margin(Edges {
                top: ctx.rh(0.012, 10.0),
                ..Edges::default()
            })
            .size(px(ctx.rw(0.18, 120.0) * underline), px(ctx.rh(0.004, 4.0)))
            .align_self(Align::Start)
            .background(Paint::linear(90.0, &[pal.accent, pal.accent.with_alpha(0.0)]))
            .radius(999.0)
            .opacity(name_opacity);

        let title_block = Node::column()
            .grow(1.0)
            .min_width(px(ctx.rw(0.28, 260.0)))
            .child(name)
            .child(underline);

        let header = Node::row()
            .align(Align::Center)
            .gap(ctx.rw(0.02, 18.0))
            .width(pct(100.0))
            .wrap()
            .child(logo)
            .child(title_block);

        let tagline = Node::text(
            copy.tagline.clone(),
            type_style(ctx.rw(0.022, 24.0), 600, 0.0, 1.25, pal.muted),
        )
        .named("brand:tagline")
        .max_width(px(ctx.rw(0.62, 520.0)))
        .translate(0.0, tagline_y)
        .opacity(tagline_opacity);

        let stack = Node::column()
            .gap(ctx.rw(0.018, 18.0))
            .align(Align::Start)
            .width(pct(100.0))
            .child(header)
            .child(tagline);

        let max_content = px(ctx.rw(0.82, 900.0));
        let body = if self.card {
            let card_in = ctx.spring(0.0, SpringConfig::new(18.0, 120.0, 0.9))?;
            let card_opacity = ctx.interp(&[0.0, 14.0], &[0.0, 1.0])?;
            Node::column()
                .named("brand:card")
                .width(pct(100.0))
                .max_width(max_content)
                .radius(ctx.rw(0.02, 24.0))
                .padding(Edges::xy(ctx.rh(0.05, 28.0), ctx.rw(0.04, 26.0)))
                .bg(pal.card)
                .border(1.0, white(0.10))
                .shadow(Shadow::drop(20.0, 70.0, black(0.35)))
                .translate(0.0, (1.0 - card_in) * ctx.rh(0.06, 40.0))
                .scale(0.98 + card_in * 0.02)
                .opacity(card_opacity)
                .child(stack)
        } else {
            stack.max_width(max_content)
        };

        Ok(Node::fill()
            .named(self.name())
            .padding(Edges::all(ctx.rw(0.06, 48.0)))
            .center()
            .child(body))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/brand_reveal.rs"]
mod tests;
