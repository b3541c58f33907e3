//! Text measurement and shaping.
//!
//! With a font available, text is shaped with Parley and glyph positions are kept for drawing.
//! Without one, sizes come from a fixed per-character advance estimate so layout stays stable,
//! and nothing is drawn.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::assets::store::FontAsset;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::Fnv1a64;
use crate::style::style::{TextAlign, TextStyle};

/// Average advance of a glyph as a fraction of the font size, used without a font.
const FALLBACK_ADVANCE_EM: f32 = 0.56;
/// Bold text is assumed this much wider in the fallback estimate.
const FALLBACK_BOLD_FACTOR: f32 = 1.06;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// One glyph positioned in text-box space, `y` on the baseline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PositionedGlyph {
    /// Glyph id in the font.
    pub id: u32,
    /// Pen x.
    pub x: f32,
    /// Baseline y.
    pub y: f32,
}

/// Glyphs sharing one font size.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GlyphRun {
    /// Font size in pixels.
    pub font_size: f32,
    /// Glyphs in visual order.
    pub glyphs: Vec<PositionedGlyph>,
}

/// Result of shaping a text node at its final width.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ShapedText {
    /// Width of the widest line.
    pub width: f32,
    /// Total height of all lines.
    pub height: f32,
    /// Number of lines.
    pub lines: usize,
    /// Glyph runs; empty when no font is available.
    #[serde(skip)]
    pub runs: Vec<GlyphRun>,
}

/// Stateful helper for building Parley layouts from one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` and prepare fresh Parley contexts.
    pub(crate) fn new(font: &FontAsset) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.as_ref().clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ReelError::validation("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape and break `text` at `max_width_px`.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        letter_spacing_px: f32,
        max_width_px: Option<f32>,
    ) -> ReelResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation(
                "text size must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            letter_spacing_px,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(
            TextBrushRgba8::default(),
        ));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(
            max_width_px,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

/// Measures and shapes text for one render worker.
pub struct TextShaper {
    engine: Option<TextLayoutEngine>,
    measure_cache: HashMap<u64, (f32, f32)>,
}

impl std::fmt::Debug for TextShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextShaper")
            .field("family", &self.engine.as_ref().map(|e| e.family_name.as_str()))
            .field("cached", &self.measure_cache.len())
            .finish()
    }
}

impl TextShaper {
    /// Shaper using `font`, or the fallback estimate when `None`.
    pub fn new(font: Option<&FontAsset>) -> ReelResult<Self> {
        let engine = font.map(TextLayoutEngine::new).transpose()?;
        Ok(Self {
            engine,
            measure_cache: HashMap::new(),
        })
    }

    /// Size of `text` when wrapped at `max_width` (unbounded when `None`).
    pub fn measure(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f32>,
    ) -> ReelResult<(f32, f32)> {
        let key = measure_key(text, style, max_width);
        if let Some(hit) = self.measure_cache.get(&key) {
            return Ok(*hit);
        }
        let shaped = self.shape_inner(text, style, max_width, false)?;
        let size = (shaped.width, shaped.height);
        self.measure_cache.insert(key, size);
        Ok(size)
    }

    /// Shape `text` into a box `width` pixels wide, aligning lines per `style.align`.
    pub fn shape(&mut self, text: &str, style: &TextStyle, width: f32) -> ReelResult<ShapedText> {
        self.shape_inner(text, style, Some(width), true)
    }

    fn shape_inner(
        &mut self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f32>,
        with_glyphs: bool,
    ) -> ReelResult<ShapedText> {
        let text: Cow<'_, str> = if style.uppercase {
            Cow::Owned(text.to_uppercase())
        } else {
            Cow::Borrowed(text)
        };
        // Allow sub-pixel overshoot from the measuring pass.
        let wrap_at = max_width.map(|w| w + 0.5);

        let Some(engine) = self.engine.as_mut() else {
            return Ok(estimate(&text, style, wrap_at));
        };

        let layout = engine.layout_plain(
            &text,
            style.size as f32,
            style.letter_spacing as f32,
            wrap_at,
        )?;
        let line_h = (style.size * style.line_height) as f32;
        let lines = layout.lines().count();
        let mut shaped = ShapedText {
            width: layout.width(),
            height: layout.height().max(line_h * lines as f32),
            lines,
            runs: Vec::new(),
        };
        if !with_glyphs {
            return Ok(shaped);
        }

        let box_w = max_width.unwrap_or(shaped.width);
        for line in layout.lines() {
            let mut line_runs = Vec::new();
            let mut right = 0.0f32;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs: Vec<PositionedGlyph> = run
                    .glyphs()
                    .map(|g| {
                        right = right.max(g.x + g.advance);
                        PositionedGlyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        }
                    })
                    .collect();
                line_runs.push(GlyphRun {
                    font_size: run.run().font_size(),
                    glyphs,
                });
            }
            let shift = align_shift(style.align, box_w, right);
            for run in &mut line_runs {
                for g in &mut run.glyphs {
                    g.x += shift;
                }
            }
            shaped.runs.extend(line_runs);
        }
        Ok(shaped)
    }
}

fn align_shift(align: TextAlign, box_w: f32, line_w: f32) -> f32 {
    let free = (box_w - line_w).max(0.0);
    match align {
        TextAlign::Start => 0.0,
        TextAlign::Center => free / 2.0,
        TextAlign::End => free,
    }
}

fn measure_key(text: &str, style: &TextStyle, max_width: Option<f32>) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(text.as_bytes());
    h.write_f32(style.size as f32);
    h.write_f32(style.letter_spacing as f32);
    h.write_f32(style.line_height as f32);
    h.write_u32(u32::from(style.weight));
    h.write_bytes(&[u8::from(style.uppercase), u8::from(max_width.is_some())]);
    h.write_f32(max_width.unwrap_or(0.0));
    h.finish()
}

fn estimate(text: &str, style: &TextStyle, max_width: Option<f32>) -> ShapedText {
    let size = style.size as f32;
    let mut advance = size * FALLBACK_ADVANCE_EM;
    if style.weight >= 600 {
        advance *= FALLBACK_BOLD_FACTOR;
    }
    let advance = advance + style.letter_spacing as f32;
    let space = advance;
    let line_h = (style.size * style.line_height) as f32;

    let mut widest = 0.0f32;
    let mut lines = 0usize;
    for paragraph in text.split('\n') {
        let mut line_w = 0.0f32;
        lines += 1;
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let word_w = word.chars().count() as f32 * advance;
            let candidate = if line_w == 0.0 {
                word_w
            } else {
                line_w + space + word_w
            };
            match max_width {
                Some(max) if candidate > max && line_w > 0.0 => {
                    widest = widest.max(line_w);
                    lines += 1;
                    line_w = word_w;
                }
                _ => line_w = candidate,
            }
        }
        widest = widest.max(line_w);
    }

    ShapedText {
        width: widest,
        height: lines as f32 * line_h,
        lines,
        runs: Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text.rs"]
mod tests;
