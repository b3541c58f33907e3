//! springreel renders parametrized motion-graphics intros frame by frame.
//!
//! Every visual attribute is a pure function of the frame index, computed with two helpers:
//! a clamped [`interpolate`] and a damped-[`spring`] easing. Scenes build a declarative
//! [`Node`] tree per frame, which is laid out with Taffy, lowered into a display list and
//! rasterized on the CPU.
//!
//! - Build a [`Composition`], usually from an [`IntroConfig`] via [`intro::build`]
//! - Create a [`RenderSession`]
//! - Render single frames or stream a range into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod animation;
pub mod assets;
pub mod compile;
pub mod encode;
pub mod intro;
pub mod layout;
pub mod render;
pub mod scene;
pub mod session;
pub mod style;
pub mod timeline;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8Premul};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::interpolate::{
    Extrapolate, InterpolateOpts, interpolate, interpolate_clamped,
};
pub use crate::animation::spring::{Spring, SpringConfig, measure_spring, spring};
pub use crate::assets::store::AssetStore;
pub use crate::encode::{
    FfmpegSink, FfmpegSinkOpts, FrameSink, InMemorySink, PngSequenceSink, SinkConfig,
};
pub use crate::intro::{IntroConfig, Variant};
pub use crate::render::{CpuBackend, FrameRGBA};
pub use crate::scene::composition::Composition;
pub use crate::scene::layers::Layers;
pub use crate::scene::scene::{Scene, SceneCtx};
pub use crate::session::{FrameSnapshot, RenderSession, RenderSessionOpts, RenderStats};
pub use crate::style::color::Color;
pub use crate::style::node::Node;
pub use crate::timeline::presentation::{Presentation, SlideFrom};
pub use crate::timeline::series::TransitionSeries;
pub use crate::timeline::timing::Timing;
