use crate::foundation::{
    core::{Rect, ensure_side},
    error::CoverResult,
};

/// Bottom bar height, percent of the side length.
pub const BOTTOM_BAR_PERCENT: f64 = 5.0;
/// Side bar height, percent of the side length.
pub const SIDE_BAR_PERCENT: f64 = 15.0;
/// Caption font size as a fraction of the side bar height.
pub const CAPTION_FONT_RATIO: f64 = 0.60;
/// Logo inset from the top-left corner, percent of the side length.
pub const LOGO_PADDING_PERCENT: f64 = 2.5;
/// Logo side, percent of the side length.
pub const LOGO_SIZE_PERCENT: f64 = 10.0;

/// Every proportional measurement of a cover, derived from the surface side length alone.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CoverGeometry {
    /// Side length the geometry was derived for.
    pub side: f64,
    /// Top of the full-width bottom bar.
    pub bottom_bar_y: f64,
    /// Height of the bottom bar.
    pub bottom_bar_height: f64,
    /// Top of the side bar.
    pub side_bar_y: f64,
    /// Height of the side bar.
    pub side_bar_height: f64,
    /// Width of the side bar (equal to the bottom bar height).
    pub side_bar_width: f64,
    /// Left edge of the caption block.
    pub text_origin_x: f64,
    /// Caption block origin (the side bar top).
    pub text_origin_y: f64,
    /// Caption font size, also used as line height.
    pub text_height: f64,
    /// Horizontal room left for the caption.
    pub text_max_width: f64,
    /// Logo inset from the top and left edges.
    pub logo_padding: f64,
    /// Logo side length.
    pub logo_size: f64,
}

fn percent(p: f64, side: f64) -> f64 {
    (p * side) / 100.0
}

impl CoverGeometry {
    /// Derive the layout for a square surface of `side` pixels.
    ///
    /// Fails fast on non-finite or non-positive sides.
    pub fn for_side(side: f64) -> CoverResult<Self> {
        let side = ensure_side(side)?;

        let bottom_bar_height = percent(BOTTOM_BAR_PERCENT, side);
        let side_bar_height = percent(SIDE_BAR_PERCENT, side);
        let side_bar_width = bottom_bar_height;

        let bottom_bar_y = side - bottom_bar_height;
        let side_bar_y = side - 2.5 * bottom_bar_height - side_bar_height;

        let text_origin_x = 2.0 * side_bar_width;

        Ok(Self {
            side,
            bottom_bar_y,
            bottom_bar_height,
            side_bar_y,
            side_bar_height,
            side_bar_width,
            text_origin_x,
            text_origin_y: side_bar_y,
            text_height: side_bar_height * CAPTION_FONT_RATIO,
            text_max_width: side - text_origin_x,
            logo_padding: percent(LOGO_PADDING_PERCENT, side),
            logo_size: percent(LOGO_SIZE_PERCENT, side),
        })
    }

    /// Full-width strip along the bottom edge.
    pub fn bottom_bar(&self) -> Rect {
        Rect::new(
            0.0,
            self.bottom_bar_y,
            self.side,
            self.bottom_bar_y + self.bottom_bar_height,
        )
    }

    /// Narrow strip on the left edge, next to the caption.
    pub fn side_bar(&self) -> Rect {
        Rect::new(
            0.0,
            self.side_bar_y,
            self.side_bar_width,
            self.side_bar_y + self.side_bar_height,
        )
    }

    /// Logo box in the top-left corner.
    pub fn logo_rect(&self) -> Rect {
        Rect::new(
            self.logo_padding,
            self.logo_padding,
            self.logo_padding + self.logo_size,
            self.logo_padding + self.logo_size,
        )
    }

    /// Every measurement divided by the side length, for congruence checks.
    pub fn normalized(&self) -> [f64; 11] {
        let s = self.side;
        [
            self.bottom_bar_y / s,
            self.bottom_bar_height / s,
            self.side_bar_y / s,
            self.side_bar_height / s,
            self.side_bar_width / s,
            self.text_origin_x / s,
            self.text_origin_y / s,
            self.text_height / s,
            self.text_max_width / s,
            self.logo_padding / s,
            self.logo_size / s,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
