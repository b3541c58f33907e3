//! Rendering backends.
//!
//! The only backend is the CPU rasterizer on `vello_cpu`; it consumes
//! [`crate::compile::RenderTree`] display lists and produces premultiplied RGBA8 frames.

/// Backend trait and frame buffers.
pub mod backend;
/// `vello_cpu` backend.
pub mod cpu;
pub(crate) mod raster;

pub use backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use cpu::CpuBackend;
