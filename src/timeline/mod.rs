//! Scene sequencing: transition timings, presentations and transition series.

/// Fade and slide presentations.
pub mod presentation;
pub mod series;
/// Transition timings.
pub mod timing;
