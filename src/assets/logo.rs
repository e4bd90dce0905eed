use std::sync::Arc;

use crate::{
    assets::decode::{SourceImage, decode_image},
    foundation::error::{CoverError, CoverResult},
};

// Larger logo boxes are a config mistake, not something to allocate for.
const MAX_LOGO_PX: u32 = 16_384;

/// Logo overlay: a decoded raster or a vector tree rasterized per surface.
#[derive(Clone, Debug)]
pub enum LogoImage {
    /// PNG/JPEG/... logo, drawn scaled into the logo box.
    Raster(SourceImage),
    /// SVG logo, rasterized at the logo box size of each surface.
    Svg(Arc<usvg::Tree>),
}

impl LogoImage {
    /// Decode logo bytes; SVG is detected from the leading markup.
    pub fn decode(bytes: &[u8]) -> CoverResult<Self> {
        if looks_like_svg(bytes) {
            let opts = usvg::Options::default();
            let tree = usvg::Tree::from_data(bytes, &opts)
                .map_err(|e| CoverError::decode(format!("parse svg logo: {e}")))?;
            return Ok(Self::Svg(Arc::new(tree)));
        }
        Ok(Self::Raster(decode_image(bytes)?))
    }

    /// Pixels to draw into a `size_px` square logo box.
    ///
    /// Raster logos are returned as-is and scaled by the surface.
    pub fn raster_for(&self, size_px: u32) -> CoverResult<SourceImage> {
        match self {
            Self::Raster(img) => Ok(img.clone()),
            Self::Svg(tree) => {
                let side = size_px.clamp(1, MAX_LOGO_PX);
                let data = rasterize_svg_to_premul_rgba8(tree, side, side)?;
                SourceImage::from_premul_rgba8(side, side, data)
            }
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

fn rasterize_svg_to_premul_rgba8(tree: &usvg::Tree, width: u32, height: u32) -> CoverResult<Vec<u8>> {
    let size = tree.size();
    if !(size.width() > 0.0 && size.height() > 0.0) {
        return Err(CoverError::decode("svg logo has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CoverError::decode("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
