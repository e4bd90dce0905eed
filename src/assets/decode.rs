use std::sync::Arc;

use crate::foundation::error::{CoverError, CoverResult};

/// Feedback shown when a dropped or picked file is not an image.
pub const UNSUPPORTED_INPUT_MSG: &str = "unsupported file type, please add an image";

/// Decoded source raster, premultiplied RGBA8.
///
/// Immutable once built; clones share the pixel buffer.
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Build from straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> CoverResult<Self> {
        check_len(width, height, rgba8.len())?;
        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8),
        })
    }

    /// Build from bytes that are already premultiplied.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> CoverResult<Self> {
        check_len(width, height, rgba8_premul.len())?;
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }
}

fn check_len(width: u32, height: u32, len: usize) -> CoverResult<()> {
    if width == 0 || height == 0 {
        return Err(CoverError::decode("image has zero width or height"));
    }
    if len != width as usize * height as usize * 4 {
        return Err(CoverError::decode(format!(
            "rgba8 byte length {len} does not match {width}x{height}"
        )));
    }
    Ok(())
}

/// Accept only `image/*` media types, as reported by a file picker or drop event.
pub fn validate_media_type(mime: &str) -> CoverResult<()> {
    let top = mime.split('/').next().unwrap_or_default().trim();
    if top.eq_ignore_ascii_case("image") {
        Ok(())
    } else {
        Err(CoverError::unsupported_input(UNSUPPORTED_INPUT_MSG))
    }
}

/// Detect the encoded image format from magic bytes.
pub fn sniff_image_format(bytes: &[u8]) -> CoverResult<image::ImageFormat> {
    image::guess_format(bytes).map_err(|_| CoverError::unsupported_input(UNSUPPORTED_INPUT_MSG))
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> CoverResult<SourceImage> {
    let format = sniff_image_format(bytes)?;
    let dyn_img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CoverError::decode(format!("decode {format:?} image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(width, height, ?format, "decoded image");

    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
