//! Frame compilation: laid-out node trees become flat display lists.

/// Lowering of laid-out node trees into draw ops.
pub mod compiler;
/// Display-list hashing for static-frame elision.
pub mod fingerprint;
/// Display list types.
pub mod render_tree;

pub use compiler::compile_frame;
pub use fingerprint::{FrameFingerprint, fingerprint_tree};
pub use render_tree::{DrawOp, RenderTree};
