//! Frame-driven animation helpers: easing curves, range interpolation and damped springs.

/// Easing curves for interpolation segments and linear timings.
pub mod ease;
/// Range interpolation with per-side extrapolation.
pub mod interpolate;
pub mod spring;
