use crate::{
    assets::decode::SourceImage,
    foundation::{
        color::Rgba8,
        core::Rect,
        error::{CoverError, CoverResult},
    },
    layout::crop::SampleRect,
    render::surface::Surface,
};

/// One recorded surface operation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCall {
    /// Image region scaled into `dst`.
    Image {
        /// Source image dimensions.
        image_size: (u32, u32),
        /// Sampled source region.
        src: SampleRect,
        /// Destination rectangle.
        dst: Rect,
    },
    /// Solid rectangle.
    FillRect {
        /// Filled rectangle.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// Caption line.
    Text {
        /// Line text.
        text: String,
        /// Left baseline x.
        x: f64,
        /// Baseline y.
        y: f64,
        /// Font size in pixels.
        size: f64,
        /// Fill color.
        color: Rgba8,
    },
}

/// Surface that records draw calls instead of rasterizing.
///
/// Text width is `chars × font_size × em_ratio`, so wrapping is deterministic and scales with
/// the surface like a real font does.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    side: u32,
    em_ratio: f64,
    fill: Rgba8,
    font_size: f64,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Recorder whose glyphs are `em_ratio` of the font size wide.
    pub fn new(em_ratio: f64) -> Self {
        Self {
            side: 0,
            em_ratio,
            fill: Rgba8::BLACK,
            font_size: 10.0,
            calls: Vec::new(),
        }
    }

    /// Calls recorded since the last resize.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Recorded caption lines.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn ensure_sized(&self) -> CoverResult<()> {
        if self.side == 0 {
            return Err(CoverError::missing_surface_context(
                "surface has not been sized yet",
            ));
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, side_px: u32) -> CoverResult<()> {
        if side_px == 0 {
            return Err(CoverError::validation("surface side length must be > 0"));
        }
        self.side = side_px;
        self.calls.clear();
        Ok(())
    }

    fn side_px(&self) -> u32 {
        self.side
    }

    fn draw_image_region(
        &mut self,
        image: &SourceImage,
        src: SampleRect,
        dst: Rect,
    ) -> CoverResult<()> {
        self.ensure_sized()?;
        self.calls.push(DrawCall::Image {
            image_size: (image.width, image.height),
            src,
            dst,
        });
        Ok(())
    }

    fn set_fill_color(&mut self, color: Rgba8) {
        self.fill = color;
    }

    fn fill_rect(&mut self, rect: Rect) -> CoverResult<()> {
        self.ensure_sized()?;
        self.calls.push(DrawCall::FillRect {
            rect,
            color: self.fill,
        });
        Ok(())
    }

    fn set_font_size(&mut self, size_px: f64) {
        self.font_size = size_px;
    }

    fn measure_text_width(&mut self, text: &str) -> CoverResult<f64> {
        Ok(text.chars().count() as f64 * self.font_size * self.em_ratio)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> CoverResult<()> {
        self.ensure_sized()?;
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            x,
            y,
            size: self.font_size,
            color: self.fill,
        });
        Ok(())
    }
}
