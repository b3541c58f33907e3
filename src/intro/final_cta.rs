use std::sync::Arc;

use crate::animation::spring::SpringConfig;
use crate::foundation::error::ReelResult;
use crate::intro::config::IntroConfig;
use crate::intro::kit::{black, centered, logo_mark, type_style, white};
use crate::scene::scene::{Scene, SceneCtx};
use crate::style::node::Node;
use crate::style::paint::{Paint, Shadow};
use crate::style::style::{Align, Edges, pct, px};

/// Scene 3: centered logo, a large "Try it now!" with a soft pulse, subline and button.
#[derive(Clone, Debug)]
pub struct FinalCta {
    cfg: Arc<IntroConfig>,
}

impl FinalCta {
    /// Final call to action.
    pub fn new(cfg: Arc<IntroConfig>) -> Self {
        Self { cfg }
    }
}

impl Scene for FinalCta {
    fn name(&self) -> &str {
        "final-cta"
    }

    fn render(&self, ctx: &SceneCtx<'_>) -> ReelResult<Node> {
        let pal = &self.cfg.palette;
        let copy = &self.cfg.copy;

        let in_spring = ctx.spring(6.0, SpringConfig::new(16.0, 160.0, 0.9))?;
        let opacity = ctx.interp(&[0.0, 16.0], &[0.0, 1.0])?;
        let y = (1.0 - in_spring) * ctx.rh(0.04, 26.0);
        let pulse = ctx.interp(&[24.0, 36.0, 54.0], &[1.0, 1.04, 1.0])?;
        let logo_scale = 0.92 + in_spring * 0.08;

        let logo_size = ctx.rw(0.12, 96.0);
        let logo = Node::row()
            .named("final:logo")
            .size_px(logo_size, logo_size)
            .center()
            .scale(logo_scale)
            .opacity(opacity)
            .child(logo_mark(ctx, logo_size, &copy.app_name, pal.accent));

        let headline = Node::text(
            copy.final_cta.clone(),
            centered(type_style(ctx.rw(0.075, 56.0), 900, -1.2, 1.02, pal.text)),
        )
        .named("final:headline")
        .scale(pulse)
        .opacity(opacity);

        let subline = Node::text(
            copy.final_subline.clone(),
            centered(type_style(ctx.rw(0.022, 24.0), 600, 0.0, 1.2, pal.muted)),
        )
        .named("final:subline")
        .max_width(px(ctx.rw(0.62, 560.0)))
        .opacity(opacity);

        let button = Node::row()
            .named("final:button")
            .center()
            .padding(Edges::xy(ctx.rh(0.016, 12.0), ctx.rw(0.02, 18.0)))
            .radius(ctx.rw(0.014, 14.0))
            .background(Paint::linear(
                135.0,
                &[pal.accent.with_alpha(0.35), white(0.06)],
            ))
            .border(1.0, pal.accent.with_alpha(0.45))
            .shadow(Shadow::drop(16.0, 40.0, black(0.35)))
            .scale(pulse)
            .opacity(opacity)
            .child(Node::text(
                copy.final_button.clone(),
                type_style(ctx.rw(0.02, 20.0), 900, -0.2, 1.2, pal.text),
            ));

        let stack = Node::column()
            .named("final:stack")
            .width(pct(100.0))
            .max_width(px(ctx.rw(0.82, 900.0)))
            .align(Align::Center)
            .gap(ctx.rh(0.022, 18.0))
            .translate(0.0, y)
            .opacity(opacity)
            .child(logo)
            .child(headline)
            .child(subline)
            .child(button);

        Ok(Node::fill()
            .named(self.name())
            .padding(Edges::all(ctx.rw(0.06, 48.0)))
            .center()
            .child(stack))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/final_cta.rs"]
mod tests;
