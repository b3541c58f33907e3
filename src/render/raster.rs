//! Software rasterizers for paints `vello_cpu` does not draw directly.
//!
//! All outputs are tightly packed premultiplied RGBA8.

use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::mul_div255_u8;
use crate::style::paint::{Paint, sample_stops};

/// Refuse to allocate rasters beyond this many pixels.
const MAX_PIXELS: u64 = 64 * 1024 * 1024;

fn alloc(width: u32, height: u32) -> ReelResult<Vec<u8>> {
    let px = u64::from(width) * u64::from(height);
    if width == 0 || height == 0 || px > MAX_PIXELS {
        return Err(ReelError::evaluation(format!(
            "raster size {width}x{height} out of range"
        )));
    }
    Ok(vec![0u8; (px as usize) * 4])
}

/// Rasterize `paint` over a `width` x `height` box.
pub(crate) fn rasterize_paint(paint: &Paint, width: u32, height: u32) -> ReelResult<Vec<u8>> {
    let mut out = alloc(width, height)?;
    let (w, h) = (f64::from(width), f64::from(height));
    match paint {
        Paint::Solid { color } => {
            let p = color.premul();
            for px in out.chunks_exact_mut(4) {
                px.copy_from_slice(&[p.r, p.g, p.b, p.a]);
            }
        }
        Paint::Linear { angle_deg, stops } => {
            // CSS: 0deg points up, angles turn clockwise, and the gradient line spans the
            // box so that the corners hit offsets 0 and 1.
            let a = angle_deg.to_radians();
            let (dx, dy) = (a.sin(), -a.cos());
            let len = (w * dx).abs() + (h * dy).abs();
            let (cx, cy) = (w / 2.0, h / 2.0);
            for y in 0..height {
                let py = f64::from(y) + 0.5 - cy;
                for x in 0..width {
                    let px = f64::from(x) + 0.5 - cx;
                    let t = if len > 0.0 {
                        (px * dx + py * dy) / len + 0.5
                    } else {
                        0.0
                    };
                    put(&mut out, width, x, y, sample_stops(stops, t).premul());
                }
            }
        }
        Paint::Radial { center, stops } => {
            let (cx, cy) = (center.x * w, center.y * h);
            let far_x = cx.max(w - cx);
            let far_y = cy.max(h - cy);
            let r = (far_x * far_x + far_y * far_y).sqrt();
            for y in 0..height {
                let py = f64::from(y) + 0.5 - cy;
                for x in 0..width {
                    let px = f64::from(x) + 0.5 - cx;
                    let t = if r > 0.0 {
                        (px * px + py * py).sqrt() / r
                    } else {
                        0.0
                    };
                    put(&mut out, width, x, y, sample_stops(stops, t).premul());
                }
            }
        }
    }
    Ok(out)
}

fn put(buf: &mut [u8], width: u32, x: u32, y: u32, c: crate::foundation::core::Rgba8Premul) {
    let i = ((y as usize) * (width as usize) + (x as usize)) * 4;
    buf[i..i + 4].copy_from_slice(&[c.r, c.g, c.b, c.a]);
}

/// Padding around a shadow raster so the blur tail is not cut off.
pub(crate) fn shadow_pad(blur: f64) -> u32 {
    (blur.max(0.0) * 1.5).ceil() as u32
}

/// Blurred rounded-rectangle silhouette tinted with a premultiplied color.
///
/// The raster is `w + 2 * pad` by `h + 2 * pad`; the box sits at `(pad, pad)`. CSS blur radius
/// `blur` maps to a Gaussian with `sigma = blur / 2`.
pub(crate) fn rasterize_shadow(
    w: u32,
    h: u32,
    radius: f64,
    blur: f64,
    color: [u8; 4],
) -> ReelResult<(Vec<u8>, u32)> {
    let pad = shadow_pad(blur);
    let (ow, oh) = (w + 2 * pad, h + 2 * pad);
    // Validate size through the shared allocator before building the mask.
    let mut out = alloc(ow, oh)?;

    let mut mask = vec![0u8; (ow as usize) * (oh as usize)];
    let (x0, y0) = (f64::from(pad), f64::from(pad));
    let (x1, y1) = (x0 + f64::from(w), y0 + f64::from(h));
    let r = radius.max(0.0).min(f64::from(w.min(h)) / 2.0);
    for y in 0..oh {
        let py = f64::from(y) + 0.5;
        for x in 0..ow {
            let px = f64::from(x) + 0.5;
            let cov = rounded_rect_coverage(px, py, x0, y0, x1, y1, r);
            mask[(y as usize) * (ow as usize) + (x as usize)] =
                (cov * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }

    if blur > 0.0 {
        let sigma = (blur / 2.0) as f32;
        let kernel = gaussian_kernel_q16(pad, sigma)?;
        let mut tmp = vec![0u8; mask.len()];
        blur_horizontal_q16(&mask, &mut tmp, ow, oh, &kernel);
        blur_vertical_q16(&tmp, &mut mask, ow, oh, &kernel);
    }

    for (px, &m) in out.chunks_exact_mut(4).zip(&mask) {
        let m = u16::from(m);
        px[0] = mul_div255_u8(u16::from(color[0]), m);
        px[1] = mul_div255_u8(u16::from(color[1]), m);
        px[2] = mul_div255_u8(u16::from(color[2]), m);
        px[3] = mul_div255_u8(u16::from(color[3]), m);
    }
    Ok((out, pad))
}

/// Approximate coverage of a pixel centered at `(px, py)` by a rounded rectangle.
fn rounded_rect_coverage(px: f64, py: f64, x0: f64, y0: f64, x1: f64, y1: f64, r: f64) -> f64 {
    // Signed distance to the rounded box; a one-pixel ramp gives the anti-aliasing.
    let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    let (hx, hy) = ((x1 - x0) / 2.0 - r, (y1 - y0) / 2.0 - r);
    let qx = (px - cx).abs() - hx;
    let qy = (py - cy).abs() - hy;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    let d = outside + inside - r;
    (0.5 - d).clamp(0.0, 1.0)
}

pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ReelResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ReelError::validation("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Keep the kernel summing to exactly 1.0 in Q16.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn blur_horizontal_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    for y in 0..i64::from(height) {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = x + ki as i64 - radius;
                if (0..w).contains(&sx) {
                    acc += u64::from(kw) * u64::from(src[(y * w + sx) as usize]);
                }
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn blur_vertical_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (i64::from(width), i64::from(height));
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0u64;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = y + ki as i64 - radius;
                if (0..h).contains(&sy) {
                    acc += u64::from(kw) * u64::from(src[(sy * w + x) as usize]);
                }
            }
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
