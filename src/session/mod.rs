//! Frame and range rendering.

/// Session-oriented rendering API.
pub mod render_session;

pub use render_session::{FrameSnapshot, RenderSession, RenderSessionOpts, RenderStats};
