use std::{borrow::Cow, sync::Arc};

use crate::foundation::{
    color::Rgba8,
    error::{CoverError, CoverResult},
};

/// Caption font: raw font bytes plus the family name registered from them.
#[derive(Clone)]
pub struct CaptionFont {
    bytes: Arc<Vec<u8>>,
    family: String,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("font_bytes_len", &self.bytes.len())
            .field("family", &self.family)
            .finish()
    }
}

impl CaptionFont {
    /// Original font bytes used to build glyph outlines.
    pub fn bytes(&self) -> &Arc<Vec<u8>> {
        &self.bytes
    }

    /// Primary family name detected from the font data.
    pub fn family(&self) -> &str {
        &self.family
    }
}

/// One shaped caption line, glyph positions relative to its left baseline point.
#[derive(Clone, Debug, Default)]
pub struct ShapedLine {
    /// `(glyph id, x, y)` triples.
    pub glyphs: Vec<(u32, f32, f32)>,
    /// Advance width including trailing whitespace.
    pub width: f32,
}

/// Stateful helper shaping single caption lines with Parley.
///
/// All lines use the bold weight of the registered family.
pub struct TextShaper {
    font: CaptionFont,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl TextShaper {
    /// Register `font_bytes` and build fresh Parley contexts.
    pub fn new(font_bytes: Vec<u8>) -> CoverResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CoverError::validation("no font families registered from font bytes")
        })?;

        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CoverError::validation("registered font family has no name"))?
            .to_string();
        tracing::debug!(%family, "registered caption font");

        Ok(Self {
            font: CaptionFont {
                bytes: Arc::new(font_bytes),
                family,
            },
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    /// Font backing this shaper.
    pub fn font(&self) -> &CaptionFont {
        &self.font
    }

    fn layout(&mut self, text: &str, size_px: f32) -> CoverResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CoverError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` on one line, trailing whitespace included.
    pub fn measure(&mut self, text: &str, size_px: f32) -> CoverResult<f32> {
        Ok(self.layout(text, size_px)?.full_width())
    }

    /// Shape `text` as a single unbroken line.
    pub fn shape_line(&mut self, text: &str, size_px: f32) -> CoverResult<ShapedLine> {
        let layout = self.layout(text, size_px)?;
        let mut out = ShapedLine {
            glyphs: Vec::new(),
            width: layout.full_width(),
        };

        for line in layout.lines() {
            let baseline = line.metrics().baseline;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                out.glyphs.extend(
                    run.positioned_glyphs()
                        .map(|g| (g.id, g.x, g.y - baseline)),
                );
            }
        }
        Ok(out)
    }
}
