use crate::assets::store::AssetStore;
use crate::compile::render_tree::RenderTree;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::mul_div255_u16;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are premultiplied alpha. Use [`FrameRGBA::flatten_onto`] to get opaque pixels for
/// encoders without alpha support.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Composite over an opaque straight RGB background, returning opaque RGBA8.
    pub fn flatten_onto(&self, bg: [u8; 3]) -> Vec<u8> {
        let mut out = vec![0u8; self.data.len()];
        flatten_premul_over_bg(&mut out, &self.data, bg);
        out
    }

    /// Like [`FrameRGBA::flatten_onto`], writing into a reusable buffer of the same length.
    pub fn flatten_into(&self, dst: &mut [u8], bg: [u8; 3]) -> ReelResult<()> {
        if dst.len() != self.data.len() {
            return Err(ReelError::validation(format!(
                "flatten buffer has {} bytes, frame has {}",
                dst.len(),
                self.data.len()
            )));
        }
        flatten_premul_over_bg(dst, &self.data, bg);
        Ok(())
    }

    /// Straight-alpha RGBA8, as PNG encoders expect.
    pub fn to_straight(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// A renderer that executes a compiled [`RenderTree`] into a [`FrameRGBA`].
pub trait RenderBackend: Send {
    /// Draw `tree` using images and fonts from `assets`.
    fn render_tree(&mut self, tree: &RenderTree, assets: &AssetStore) -> ReelResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new()),
    }
}

fn flatten_premul_over_bg(dst: &mut [u8], src_premul: &[u8], bg: [u8; 3]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        for c in 0..3 {
            d[c] = (u16::from(s[c]) + mul_div255_u16(u16::from(bg[c]), inv)).min(255) as u8;
        }
        d[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
