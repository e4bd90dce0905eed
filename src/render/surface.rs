use crate::{
    assets::{decode::SourceImage, logo::LogoImage},
    foundation::{color::Rgba8, core::Rect, error::CoverResult},
    layout::crop::SampleRect,
};

/// Resizable square 2D drawing target the compositor paints into.
///
/// Operations mirror an immediate-mode canvas: later calls paint over earlier ones.
pub trait Surface {
    /// Resize to `side_px` square; clears everything drawn so far.
    fn resize(&mut self, side_px: u32) -> CoverResult<()>;

    /// Current side length in pixels (0 before the first resize).
    fn side_px(&self) -> u32;

    /// Draw the `src` region of `image` scaled into `dst`.
    fn draw_image_region(
        &mut self,
        image: &SourceImage,
        src: SampleRect,
        dst: Rect,
    ) -> CoverResult<()>;

    /// Color used by [`Surface::fill_rect`] and [`Surface::fill_text`].
    fn set_fill_color(&mut self, color: Rgba8);

    /// Fill `rect` with the current fill color.
    fn fill_rect(&mut self, rect: Rect) -> CoverResult<()>;

    /// Caption font size in pixels for subsequent text calls.
    fn set_font_size(&mut self, size_px: f64);

    /// Advance width of `text` at the current font size.
    fn measure_text_width(&mut self, text: &str) -> CoverResult<f64>;

    /// Paint `text` with its left baseline point at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> CoverResult<()>;

    /// Draw `logo` scaled into the square `dst`.
    fn draw_logo(&mut self, logo: &LogoImage, dst: Rect) -> CoverResult<()> {
        let pixels = logo.raster_for(dst.width().ceil() as u32)?;
        self.draw_image_region(&pixels, SampleRect::whole(&pixels), dst)
    }
}

/// A rendered surface read back as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct CoverFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl CoverFrame {
    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            crate::assets::decode::unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    /// Straight-alpha pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[i..i + 4]);
        if self.premultiplied {
            crate::assets::decode::unpremultiply_rgba8_in_place(&mut px);
        }
        Some(px)
    }
}
