//! Assembly of the four intro variants into compositions.

use std::sync::Arc;

use crate::animation::spring::SpringConfig;
use crate::assets::store::AssetStore;
use crate::foundation::core::Fps;
use crate::foundation::error::ReelResult;
use crate::intro::backdrop::{AmbientGlows, GlowInset};
use crate::intro::brand_reveal::BrandReveal;
use crate::intro::chart_outro::ChartOutro;
use crate::intro::config::{IntroConfig, Variant};
use crate::intro::final_cta::FinalCta;
use crate::intro::gold_chart::GoldChart;
use crate::intro::histogram::Histogram;
use crate::intro::value_prop::ValueProp;
use crate::scene::composition::Composition;
use crate::scene::layers::Layers;
use crate::scene::scene::Scene;
use crate::timeline::presentation::{Presentation, SlideFrom};
use crate::timeline::series::TransitionSeries;
use crate::timeline::timing::Timing;

/// Load the configured assets and build the configured variant.
#[tracing::instrument(skip(cfg), fields(variant = %cfg.variant))]
pub fn build(cfg: IntroConfig) -> ReelResult<Composition> {
    cfg.validate()?;
    let assets = cfg.load_assets()?;
    compose(cfg, assets)
}

/// Build the configured variant on top of already loaded assets.
pub fn compose(cfg: IntroConfig, assets: AssetStore) -> ReelResult<Composition> {
    cfg.validate()?;
    let canvas = cfg.canvas()?;
    let fps = cfg.fps()?;
    let variant = cfg.variant;
    let cfg = Arc::new(cfg);

    let (root, duration, background) = match variant {
        Variant::CardIntro => (
            Arc::new(card_intro(&cfg, fps)?) as Arc<dyn Scene>,
            None,
            cfg.palette.background,
        ),
        Variant::ProductTour => (
            Arc::new(product_tour(&cfg, fps)?) as Arc<dyn Scene>,
            None,
            cfg.palette.background,
        ),
        Variant::GoldChart => (
            Arc::new(GoldChart::new(cfg.clone())) as Arc<dyn Scene>,
            Some(cfg.timings.gold_chart),
            cfg.gold_palette.background,
        ),
        Variant::ChartOutro => (
            Arc::new(ChartOutro::new(cfg.clone())) as Arc<dyn Scene>,
            Some(cfg.timings.chart_outro),
            cfg.outro_palette.background,
        ),
    };

    let comp = Composition::new(variant.name(), canvas, fps, duration, root, Arc::new(assets))?
        .with_background(background);
    tracing::debug!(
        variant = %variant,
        frames = comp.duration_frames(),
        "built composition"
    );
    Ok(comp)
}

/// Scene 2 with its trailing slide-out to the top.
fn value_with_exit(
    cfg: &Arc<IntroConfig>,
    scene: ValueProp,
    fps: Fps,
) -> ReelResult<TransitionSeries> {
    let t = &cfg.timings;
    let exit = SpringConfig {
        damping: 200.0,
        ..SpringConfig::default()
    };
    TransitionSeries::builder("value-exit")
        .sequence("value", t.value_prop, scene)
        .transition(
            Presentation::slide(SlideFrom::FromBottom),
            Timing::spring(exit, Some(t.slide_out)),
        )
        .build(fps)
}

fn card_intro(cfg: &Arc<IntroConfig>, fps: Fps) -> ReelResult<Layers> {
    let t = &cfg.timings;
    let series = TransitionSeries::builder("card-intro")
        .sequence("brand", t.brand, BrandReveal::on_card(cfg.clone()))
        .transition(Presentation::fade(), Timing::linear(t.fade))
        .sequence(
            "value",
            t.value_prop,
            value_with_exit(cfg, ValueProp::on_card(cfg.clone()), fps)?,
        )
        .build(fps)?;
    let span = t.brand + t.value_prop;
    Ok(Layers::new("card-intro")
        .layer(AmbientGlows::new(cfg.clone(), span, GlowInset::Padding))
        .layer(series))
}

fn product_tour(cfg: &Arc<IntroConfig>, fps: Fps) -> ReelResult<Layers> {
    let t = &cfg.timings;
    let series = TransitionSeries::builder("product-tour")
        .sequence("brand", t.brand, BrandReveal::clean(cfg.clone()))
        .transition(Presentation::fade(), Timing::linear(t.fade))
        .sequence(
            "value",
            t.value_prop,
            value_with_exit(cfg, ValueProp::clean(cfg.clone()), fps)?,
        )
        .transition(Presentation::fade(), Timing::linear(t.fade))
        .sequence("final-cta", t.final_cta, FinalCta::new(cfg.clone()))
        .transition(Presentation::fade(), Timing::linear(t.fade))
        .sequence("histogram", t.histogram, Histogram::new(cfg.clone()))
        .build(fps)?;
    let span = t.brand + t.value_prop + t.final_cta + t.histogram;
    Ok(Layers::new("product-tour")
        .layer(AmbientGlows::new(cfg.clone(), span, GlowInset::Overscan).with_gold())
        .layer(series))
}

#[cfg(test)]
#[path = "../../tests/unit/intro/variants.rs"]
mod tests;
