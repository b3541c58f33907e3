use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::assets::store::{AssetStore, FontAsset, PreparedImage};
use crate::compile::render_tree::{DrawOp, RenderTree};
use crate::foundation::core::{Affine, BezPath, Rect};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::Fnv1a64;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::raster::{rasterize_paint, rasterize_shadow};
use crate::style::paint::{GradientStop, Paint, Shadow};

/// Cached rasters are dropped wholesale once a cache grows past this many entries.
const MAX_CACHED_RASTERS: usize = 256;
/// Flattening tolerance for rounded corners, in pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// CPU backend drawing display lists with `vello_cpu`.
///
/// Gradients and shadows are rasterized in software once per size and reused as image paints.
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
    image_cache: HashMap<(String, usize), vello_cpu::Image>,
    raster_cache: HashMap<u64, (vello_cpu::Image, u32)>,
    font: Option<(usize, vello_cpu::peniko::FontData)>,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("images", &self.image_cache.len())
            .field("rasters", &self.raster_cache.len())
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBackend {
    /// Backend with empty caches.
    pub fn new() -> Self {
        Self {
            ctx: None,
            image_cache: HashMap::new(),
            raster_cache: HashMap::new(),
            font: None,
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> ReelResult<R>,
    ) -> ReelResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn image_paint_for(&mut self, key: &str, img: &PreparedImage) -> ReelResult<vello_cpu::Image> {
        let cache_key = (key.to_owned(), Arc::as_ptr(&img.rgba8_premul) as usize);
        if let Some(p) = self.image_cache.get(&cache_key) {
            return Ok(p.clone());
        }
        let paint = rgba_premul_to_image(&img.rgba8_premul, img.width, img.height)?;
        if self.image_cache.len() >= MAX_CACHED_RASTERS {
            self.image_cache.clear();
        }
        self.image_cache.insert(cache_key, paint.clone());
        Ok(paint)
    }

    fn gradient_paint_for(&mut self, paint: &Paint, w: u32, h: u32) -> ReelResult<vello_cpu::Image> {
        let mut hh = Fnv1a64::new_default();
        hh.write_bytes(b"paint");
        hash_paint(&mut hh, paint);
        hh.write_u32(w);
        hh.write_u32(h);
        let key = hh.finish();
        if let Some((img, _)) = self.raster_cache.get(&key) {
            return Ok(img.clone());
        }
        let bytes = rasterize_paint(paint, w, h)?;
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.cache_raster(key, img.clone(), 0);
        Ok(img)
    }

    fn shadow_paint_for(
        &mut self,
        shadow: &Shadow,
        w: u32,
        h: u32,
        radius: f64,
    ) -> ReelResult<(vello_cpu::Image, u32)> {
        let mut hh = Fnv1a64::new_default();
        hh.write_bytes(b"shadow");
        hh.write_u32(w);
        hh.write_u32(h);
        hh.write_f32(radius as f32);
        hh.write_f32(shadow.blur as f32);
        let c = shadow.color.premul();
        hh.write_bytes(&[c.r, c.g, c.b, c.a]);
        let key = hh.finish();
        if let Some(hit) = self.raster_cache.get(&key) {
            return Ok(hit.clone());
        }
        let (bytes, pad) = rasterize_shadow(w, h, radius, shadow.blur, [c.r, c.g, c.b, c.a])?;
        let img = rgba_premul_to_image(&bytes, w + 2 * pad, h + 2 * pad)?;
        self.cache_raster(key, img.clone(), pad);
        Ok((img, pad))
    }

    fn cache_raster(&mut self, key: u64, img: vello_cpu::Image, pad: u32) {
        if self.raster_cache.len() >= MAX_CACHED_RASTERS {
            self.raster_cache.clear();
        }
        self.raster_cache.insert(key, (img, pad));
    }

    fn font_for(&mut self, font: &FontAsset) -> vello_cpu::peniko::FontData {
        let id = Arc::as_ptr(&font.bytes) as usize;
        if let Some((cached, data)) = &self.font
            && *cached == id
        {
            return data.clone();
        }
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
            font.index,
        );
        self.font = Some((id, data.clone()));
        data
    }

    fn draw_op(
        &mut self,
        op: &DrawOp,
        assets: &AssetStore,
        ctx: &mut vello_cpu::RenderContext,
    ) -> ReelResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match op {
            DrawOp::PushOpacity { opacity } => ctx.push_opacity_layer(*opacity),
            DrawOp::PushClip {
                transform,
                rect,
                radius,
            } => {
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.push_clip_layer(&bezpath_to_cpu(&rounded_path(*rect, *radius)));
            }
            DrawOp::Pop => ctx.pop_layer(),
            DrawOp::Shadow {
                transform,
                rect,
                radius,
                shadow,
            } => {
                let (w, h) = raster_size(*rect);
                let (img, pad) = self.shadow_paint_for(shadow, w, h, *radius)?;
                let pad = f64::from(pad);
                let at = *transform
                    * Affine::translate((
                        rect.x0 - pad + shadow.offset.x,
                        rect.y0 - pad + shadow.offset.y,
                    ));
                ctx.set_transform(affine_to_cpu(at));
                ctx.set_paint(img);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(w) + 2.0 * pad,
                    f64::from(h) + 2.0 * pad,
                ));
            }
            DrawOp::Fill {
                transform,
                rect,
                radius,
                paint,
            } => {
                ctx.set_transform(affine_to_cpu(*transform * Affine::translate((rect.x0, rect.y0))));
                let local = Rect::new(0.0, 0.0, rect.width(), rect.height());
                match paint.as_solid() {
                    Some(c) => {
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
                    }
                    None => {
                        let (w, h) = raster_size(local);
                        let img = self.gradient_paint_for(paint, w, h)?;
                        ctx.set_paint(img);
                    }
                }
                if *radius > 0.0 {
                    ctx.fill_path(&bezpath_to_cpu(&rounded_path(local, *radius)));
                } else {
                    ctx.fill_rect(&rect_to_cpu(local));
                }
            }
            DrawOp::Border {
                transform,
                rect,
                radius,
                width,
                color,
            } => {
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    color.r, color.g, color.b, color.a,
                ));
                ctx.fill_path(&bezpath_to_cpu(&ring_path(*rect, *radius, *width)));
            }
            DrawOp::Image {
                transform,
                rect,
                key,
            } => {
                let img = assets.image(key).ok_or_else(|| {
                    ReelError::evaluation(format!("image '{key}' missing from asset store"))
                })?;
                let paint = self.image_paint_for(key, img)?;
                let (iw, ih) = (f64::from(img.width), f64::from(img.height));
                let at = *transform
                    * Affine::translate((rect.x0, rect.y0))
                    * Affine::scale_non_uniform(rect.width() / iw, rect.height() / ih);
                ctx.set_transform(affine_to_cpu(at));
                ctx.set_paint(paint);
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
            }
            DrawOp::Text {
                transform,
                origin,
                color,
                runs,
                ..
            } => {
                let Some(font) = assets.font() else {
                    return Ok(());
                };
                let font = self.font_for(font);
                ctx.set_transform(affine_to_cpu(*transform * Affine::translate(*origin)));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    color.r, color.g, color.b, color.a,
                ));
                for run in runs {
                    let glyphs = run.glyphs.iter().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&font)
                        .font_size(run.font_size)
                        .fill_glyphs(glyphs);
                }
            }
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    fn render_tree(&mut self, tree: &RenderTree, assets: &AssetStore) -> ReelResult<FrameRGBA> {
        let w: u16 = tree
            .width
            .try_into()
            .map_err(|_| ReelError::evaluation("frame width exceeds u16"))?;
        let h: u16 = tree
            .height
            .try_into()
            .map_err(|_| ReelError::evaluation("frame height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.with_ctx_mut(w, h, |this, ctx| {
            for op in &tree.ops {
                this.draw_op(op, assets, ctx)?;
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width: tree.width,
            height: tree.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn raster_size(r: Rect) -> (u32, u32) {
    (
        r.width().ceil().max(1.0) as u32,
        r.height().ceil().max(1.0) as u32,
    )
}

fn rounded_path(rect: Rect, radius: f64) -> BezPath {
    if radius <= 0.0 {
        return rect.to_path(PATH_TOLERANCE);
    }
    kurbo::RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE)
}

/// Outer edge plus the reversed inner edge, so non-zero filling leaves a ring.
fn ring_path(rect: Rect, radius: f64, width: f64) -> BezPath {
    let mut path = rounded_path(rect, radius);
    let inner = rect.inset(-width);
    if inner.width() <= 0.0 || inner.height() <= 0.0 {
        return path;
    }
    let hole = rounded_path(inner, (radius - width).max(0.0)).reverse_subpaths();
    path.extend(hole.elements().iter().copied());
    path
}

fn hash_paint(h: &mut Fnv1a64, paint: &Paint) {
    let stops = |h: &mut Fnv1a64, stops: &[GradientStop]| {
        h.write_u32(stops.len() as u32);
        for s in stops {
            h.write_f32(s.offset as f32);
            h.write_bytes(&[s.color.r, s.color.g, s.color.b, s.color.a]);
        }
    };
    match paint {
        Paint::Solid { color } => {
            h.write_bytes(&[0, color.r, color.g, color.b, color.a]);
        }
        Paint::Linear { angle_deg, stops: s } => {
            h.write_bytes(&[1]);
            h.write_f32(*angle_deg as f32);
            stops(h, s);
        }
        Paint::Radial { center, stops: s } => {
            h.write_bytes(&[2]);
            h.write_f32(center.x as f32);
            h.write_f32(center.y as f32);
            stops(h, s);
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> ReelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ReelError::evaluation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ReelError::evaluation("pixmap height exceeds u16"))?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(ReelError::evaluation("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    let opaque = bytes.chunks_exact(4).all(|px| px[3] == 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, !opaque))
}

fn rgba_premul_to_image(bytes: &[u8], width: u32, height: u32) -> ReelResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
