//! The intro sequences: configuration, the individual scenes and their assembly.
//!
//! Every scene derives its layout from the canvas with `max(min, round(extent * k))` rules
//! and its motion from the local frame, so any canvas size and frame rate work.

/// Ambient glow layer behind the card scenes.
pub mod backdrop;
/// Logo, app name and tagline reveal.
pub mod brand_reveal;
/// Gold price chart with a sweep marker and a logo outro.
pub mod chart_outro;
pub mod config;
/// Closing call-to-action screen.
pub mod final_cta;
/// Standalone gold price bar chart.
pub mod gold_chart;
/// Gold price histogram with a moving cursor.
pub mod histogram;
pub(crate) mod kit;
/// Value proposition card with chips and a CTA.
pub mod value_prop;
pub mod variants;

pub use backdrop::{AmbientGlows, GlowInset};
pub use brand_reveal::BrandReveal;
pub use chart_outro::ChartOutro;
pub use config::{
    BrandCopy, ChartData, ChartPoint, GoldPalette, IntroConfig, LOGO_KEY, OutroCopy,
    OutroPalette, Palette, Timings, Variant,
};
pub use final_cta::FinalCta;
pub use gold_chart::{GoldChart, PlotMetrics};
pub use histogram::Histogram;
pub use value_prop::ValueProp;
pub use variants::{build, compose};
