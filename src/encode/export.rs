use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::{
    foundation::error::{CoverError, CoverResult},
    render::surface::CoverFrame,
};

/// File stem used when the caption slugifies to nothing.
pub const FALLBACK_SLUG: &str = "cover";

/// Download-safe slug of a caption.
///
/// Lowercases, drops anything but ASCII word characters, whitespace and `-`, then collapses
/// separator runs into a single `-` with none at either end.
pub fn slugify_name(name: &str) -> String {
    let kept: String = name
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(kept.len());
    let mut in_sep = false;
    for c in kept.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            in_sep = true;
            continue;
        }
        if in_sep && !out.is_empty() {
            out.push('-');
        }
        in_sep = false;
        out.push(c);
    }
    out
}

/// `<slug>.jpg` for a caption, falling back to [`FALLBACK_SLUG`].
pub fn export_file_name(caption: &str) -> String {
    let slug = slugify_name(caption);
    let stem = if slug.is_empty() { FALLBACK_SLUG } else { &slug };
    format!("{stem}.jpg")
}

fn rgb_over_black(frame: &CoverFrame) -> Vec<u8> {
    let rgba = if frame.premultiplied {
        frame.data.clone()
    } else {
        let mut premul = frame.data.clone();
        crate::assets::decode::premultiply_rgba8_in_place(&mut premul);
        premul
    };
    rgba.chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}

/// Encode a frame as JPEG; transparent areas come out black.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn encode_jpeg(frame: &CoverFrame, quality: u8) -> CoverResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(CoverError::validation("jpeg quality must be in 1..=100"));
    }
    let rgb = rgb_over_black(frame);
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut Cursor::new(&mut buf), quality)
        .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .context("encode jpeg")?;
    Ok(buf)
}

/// Encode a frame as straight-alpha PNG.
pub fn encode_png(frame: &CoverFrame) -> CoverResult<Vec<u8>> {
    let rgba = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| CoverError::render("frame byte length does not match its size"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Write encoded bytes, creating the parent directory.
pub fn write_output(path: &Path, bytes: &[u8]) -> CoverResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/export.rs"]
mod tests;
