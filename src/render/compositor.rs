use crate::{
    assets::{decode::SourceImage, logo::LogoImage},
    composition::style::StyleConfig,
    foundation::{
        core::{Rect, SurfaceSpec},
        error::CoverResult,
    },
    layout::{
        crop::{CropRect, SampleRect, resolve_sample_rect},
        geometry::CoverGeometry,
        wrap::{WrappedLine, try_wrap_text},
    },
    render::surface::Surface,
};

/// Everything one render pass needs besides the target surface.
#[derive(Clone, Copy, Debug)]
pub struct CoverInputs<'a> {
    /// Decoded source photograph.
    pub image: &'a SourceImage,
    /// User crop; `None` falls back to the centered square.
    pub crop: Option<&'a CropRect>,
    /// Current style values.
    pub style: &'a StyleConfig,
    /// Logo overlay, drawn only when `style.show_logo` is set.
    pub logo: Option<&'a LogoImage>,
}

/// What a render pass painted, in surface pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CoverLayout {
    /// Surface the pass targeted.
    pub spec: SurfaceSpec,
    /// Source region sampled onto the surface.
    pub sample: SampleRect,
    /// Proportional measurements for this surface.
    pub geometry: CoverGeometry,
    /// Caption lines at their painted (bottom-anchored) positions.
    pub lines: Vec<WrappedLine>,
    /// Whether a logo was drawn.
    pub logo_drawn: bool,
}

impl CoverLayout {
    /// Top of the caption block, the first line's painted baseline minus one line.
    pub fn caption_top(&self) -> Option<f64> {
        self.lines
            .first()
            .map(|l| l.y - self.geometry.text_height)
    }
}

/// Compose the cover onto `surface`.
///
/// Order is fixed: resize (clears) → sampled image → bars → caption → logo.
#[tracing::instrument(skip(surface, inputs), fields(role = ?spec.role, side = spec.side_px))]
pub fn render_cover(
    surface: &mut dyn Surface,
    spec: SurfaceSpec,
    inputs: CoverInputs<'_>,
) -> CoverResult<CoverLayout> {
    // Geometry first so a bad side fails before anything is painted.
    let geometry = CoverGeometry::for_side(spec.side())?;

    surface.resize(spec.side_px)?;

    let sample = resolve_sample_rect(inputs.image, inputs.crop);
    surface.draw_image_region(
        inputs.image,
        sample,
        Rect::new(0.0, 0.0, geometry.side, geometry.side),
    )?;

    surface.set_fill_color(inputs.style.bar_color);
    surface.fill_rect(geometry.bottom_bar())?;
    surface.fill_rect(geometry.side_bar())?;

    let lines = draw_caption(surface, &geometry, inputs.style)?;

    let logo_drawn = if inputs.style.show_logo {
        draw_logo(surface, &geometry, inputs.logo)?
    } else {
        false
    };

    tracing::debug!(lines = lines.len(), logo_drawn, "cover composed");
    Ok(CoverLayout {
        spec,
        sample,
        geometry,
        lines,
        logo_drawn,
    })
}

fn draw_caption(
    surface: &mut dyn Surface,
    geometry: &CoverGeometry,
    style: &StyleConfig,
) -> CoverResult<Vec<WrappedLine>> {
    surface.set_fill_color(style.text_color);
    surface.set_font_size(geometry.text_height);

    let text_height = geometry.text_height;
    let wrapped = try_wrap_text(
        |candidate| surface.measure_text_width(candidate),
        style.trimmed_caption(),
        geometry.text_origin_x,
        geometry.text_origin_y + text_height / 2.0,
        geometry.text_max_width,
        text_height,
    )?;

    // Bottom-anchor the block inside the side bar. Many lines rise above the bar.
    let block_height = wrapped.len() as f64 * text_height;
    let mut painted = Vec::with_capacity(wrapped.len());
    for line in wrapped {
        let y = line.y - block_height + geometry.side_bar_height;
        surface.fill_text(&line.text, line.x, y)?;
        painted.push(WrappedLine { y, ..line });
    }
    Ok(painted)
}

fn draw_logo(
    surface: &mut dyn Surface,
    geometry: &CoverGeometry,
    logo: Option<&LogoImage>,
) -> CoverResult<bool> {
    let Some(logo) = logo else {
        tracing::warn!("logo requested but no logo image is loaded");
        return Ok(false);
    };

    surface.draw_logo(logo, geometry.logo_rect())?;
    Ok(true)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
