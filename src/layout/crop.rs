use crate::{
    assets::decode::SourceImage,
    foundation::error::{CoverError, CoverResult},
};

/// Square crop chosen by the crop widget, in source-image pixels.
///
/// Only constructible through [`CropRect::new`], which checks it against the image it was
/// chosen on.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CropRect {
    x: f64,
    y: f64,
    side: f64,
}

impl CropRect {
    /// Validate a crop widget payload against a `image_width` x `image_height` source.
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image_width: u32,
        image_height: u32,
    ) -> CoverResult<Self> {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) {
            return Err(CoverError::validation("crop values must be finite"));
        }
        if width != height {
            return Err(CoverError::validation(format!(
                "crop must be square, got {width}x{height}"
            )));
        }
        if x < 0.0 || y < 0.0 || width <= 0.0 {
            return Err(CoverError::validation(
                "crop origin must be >= 0 and side > 0",
            ));
        }
        if x + width > f64::from(image_width) || y + height > f64::from(image_height) {
            return Err(CoverError::validation(format!(
                "crop {width}x{height}+{x}+{y} exceeds image {image_width}x{image_height}"
            )));
        }
        Ok(Self { x, y, side: width })
    }

    /// Validate a crop against an already decoded image.
    pub fn for_image(x: f64, y: f64, side: f64, image: &SourceImage) -> CoverResult<Self> {
        Self::new(x, y, side, side, image.width, image.height)
    }

    /// Left edge.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Top edge.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Side length (width == height).
    pub fn side(&self) -> f64 {
        self.side
    }
}

/// Source sub-rectangle sampled onto the whole surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SampleRect {
    /// Left edge in source pixels.
    pub sx: f64,
    /// Top edge in source pixels.
    pub sy: f64,
    /// Width in source pixels.
    pub swidth: f64,
    /// Height in source pixels.
    pub sheight: f64,
}

impl SampleRect {
    /// The full extent of `image`.
    pub fn whole(image: &SourceImage) -> Self {
        Self {
            sx: 0.0,
            sy: 0.0,
            swidth: f64::from(image.width),
            sheight: f64::from(image.height),
        }
    }

    /// Largest centered square of a `width` x `height` image.
    pub fn centered_square(width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        let side = w.min(h);
        Self {
            sx: w / 2.0 - side / 2.0,
            sy: h / 2.0 - side / 2.0,
            swidth: side,
            sheight: side,
        }
    }
}

impl From<CropRect> for SampleRect {
    fn from(c: CropRect) -> Self {
        Self {
            sx: c.x,
            sy: c.y,
            swidth: c.side,
            sheight: c.side,
        }
    }
}

/// Pick the region to sample: the user's crop verbatim, or the centered square fallback.
pub fn resolve_sample_rect(image: &SourceImage, crop: Option<&CropRect>) -> SampleRect {
    match crop {
        Some(c) => SampleRect::from(*c),
        None => SampleRect::centered_square(image.width, image.height),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/crop.rs"]
mod tests;
