use xxhash_rust::xxh3::Xxh3;

use crate::compile::render_tree::{DrawOp, RenderTree};
use crate::foundation::core::{Affine, Rect};
use crate::style::color::Color;
use crate::style::paint::{GradientStop, Paint};

const XXH3_SEED: u64 = 0x8b5ad4a0c7d8e9f1;

/// Stable per-frame fingerprint used by static-frame elision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// High 64 bits of the digest.
    pub hi: u64,
    /// Low 64 bits of the digest.
    pub lo: u64,
}

/// Fingerprint a compiled frame.
///
/// The frame index is not part of the input, so identical frames at different times match.
pub fn fingerprint_tree(tree: &RenderTree) -> FrameFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(tree.width);
    h.write_u32(tree.height);
    h.write_u32(tree.ops.len() as u32);
    for op in &tree.ops {
        write_op(&mut h, op);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_op(h: &mut StableHasher, op: &DrawOp) {
    match op {
        DrawOp::PushOpacity { opacity } => {
            h.write_u8(0);
            h.write_f32(*opacity);
        }
        DrawOp::PushClip {
            transform,
            rect,
            radius,
        } => {
            h.write_u8(1);
            write_affine(h, *transform);
            write_rect(h, *rect);
            h.write_f64(*radius);
        }
        DrawOp::Pop => h.write_u8(2),
        DrawOp::Shadow {
            transform,
            rect,
            radius,
            shadow,
        } => {
            h.write_u8(3);
            write_affine(h, *transform);
            write_rect(h, *rect);
            h.write_f64(*radius);
            h.write_f64(shadow.offset.x);
            h.write_f64(shadow.offset.y);
            h.write_f64(shadow.blur);
            write_color(h, shadow.color);
        }
        DrawOp::Fill {
            transform,
            rect,
            radius,
            paint,
        } => {
            h.write_u8(4);
            write_affine(h, *transform);
            write_rect(h, *rect);
            h.write_f64(*radius);
            write_paint(h, paint);
        }
        DrawOp::Border {
            transform,
            rect,
            radius,
            width,
            color,
        } => {
            h.write_u8(5);
            write_affine(h, *transform);
            write_rect(h, *rect);
            h.write_f64(*radius);
            h.write_f64(*width);
            write_color(h, *color);
        }
        DrawOp::Image {
            transform,
            rect,
            key,
        } => {
            h.write_u8(6);
            write_affine(h, *transform);
            write_rect(h, *rect);
            h.write_u32(key.len() as u32);
            h.write_bytes(key.as_bytes());
        }
        DrawOp::Text {
            transform,
            origin,
            color,
            runs,
            ..
        } => {
            h.write_u8(7);
            write_affine(h, *transform);
            h.write_f64(origin.0);
            h.write_f64(origin.1);
            write_color(h, *color);
            h.write_u32(runs.len() as u32);
            for run in runs {
                h.write_f32(run.font_size);
                h.write_u32(run.glyphs.len() as u32);
                for g in &run.glyphs {
                    h.write_u32(g.id);
                    h.write_f32(g.x);
                    h.write_f32(g.y);
                }
            }
        }
    }
}

fn write_affine(h: &mut StableHasher, a: Affine) {
    for c in a.as_coeffs() {
        h.write_f64(c);
    }
}

fn write_rect(h: &mut StableHasher, r: Rect) {
    h.write_f64(r.x0);
    h.write_f64(r.y0);
    h.write_f64(r.x1);
    h.write_f64(r.y1);
}

fn write_color(h: &mut StableHasher, c: Color) {
    h.write_bytes(&[c.r, c.g, c.b, c.a]);
}

fn write_stops(h: &mut StableHasher, stops: &[GradientStop]) {
    h.write_u32(stops.len() as u32);
    for s in stops {
        h.write_f64(s.offset);
        write_color(h, s.color);
    }
}

fn write_paint(h: &mut StableHasher, p: &Paint) {
    match p {
        Paint::Solid { color } => {
            h.write_u8(0);
            write_color(h, *color);
        }
        Paint::Linear { angle_deg, stops } => {
            h.write_u8(1);
            h.write_f64(*angle_deg);
            write_stops(h, stops);
        }
        Paint::Radial { center, stops } => {
            h.write_u8(2);
            h.write_f64(center.x);
            h.write_f64(center.y);
            write_stops(h, stops);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
