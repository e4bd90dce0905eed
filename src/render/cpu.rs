use std::sync::Arc;

use crate::{
    assets::{decode::SourceImage, font::TextShaper, logo::LogoImage},
    foundation::{
        color::Rgba8,
        core::Rect,
        error::{CoverError, CoverResult},
    },
    layout::crop::SampleRect,
    render::surface::{CoverFrame, Surface},
};

const IMAGE_CACHE_CAPACITY: usize = 4;
const SVG_CACHE_CAPACITY: usize = 4;

/// CPU raster surface powered by `vello_cpu`, with captions shaped by Parley.
///
/// Draw calls are recorded into a render context and rasterized on [`CpuSurface::readback`].
pub struct CpuSurface {
    side: u16,
    ctx: Option<vello_cpu::RenderContext>,
    fill: Rgba8,
    font_size: f64,
    shaper: Option<TextShaper>,
    font_data: Option<vello_cpu::peniko::FontData>,
    // Least recently used first.
    image_cache: Vec<(Arc<Vec<u8>>, vello_cpu::Image)>,
    svg_cache: Vec<(Arc<usvg::Tree>, u32, SourceImage)>,
}

impl Default for CpuSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSurface {
    /// Surface without a caption font; only empty captions can be drawn.
    pub fn new() -> Self {
        Self {
            side: 0,
            ctx: None,
            fill: Rgba8::BLACK,
            font_size: 10.0,
            shaper: None,
            font_data: None,
            image_cache: Vec::new(),
            svg_cache: Vec::new(),
        }
    }

    /// Surface with a caption font loaded from raw TTF/OTF bytes.
    pub fn with_font(font_bytes: Vec<u8>) -> CoverResult<Self> {
        let mut out = Self::new();
        out.set_caption_font(TextShaper::new(font_bytes)?);
        Ok(out)
    }

    /// Install the caption font used for measuring and painting text.
    pub fn set_caption_font(&mut self, shaper: TextShaper) {
        let bytes = shaper.font().bytes().as_ref().clone();
        self.font_data = Some(vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes),
            0,
        ));
        self.shaper = Some(shaper);
    }

    /// Rasterize everything drawn since the last resize.
    pub fn readback(&mut self) -> CoverResult<CoverFrame> {
        let side = self.side;
        let ctx = self.ctx_mut()?;
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(side, side);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(CoverFrame {
            width: u32::from(side),
            height: u32::from(side),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn ctx_mut(&mut self) -> CoverResult<&mut vello_cpu::RenderContext> {
        self.ctx.as_mut().ok_or_else(|| {
            CoverError::missing_surface_context("surface has not been sized yet")
        })
    }

    fn shaper_mut(&mut self) -> CoverResult<&mut TextShaper> {
        self.shaper
            .as_mut()
            .ok_or_else(|| CoverError::validation("no caption font loaded"))
    }

    fn image_paint_for(&mut self, image: &SourceImage) -> CoverResult<vello_cpu::Image> {
        if let Some(pos) = self
            .image_cache
            .iter()
            .position(|(px, _)| Arc::ptr_eq(px, &image.rgba8_premul))
        {
            let hit = self.image_cache.remove(pos);
            let paint = hit.1.clone();
            self.image_cache.push(hit);
            return Ok(paint);
        }

        let pixmap =
            image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        if self.image_cache.len() >= IMAGE_CACHE_CAPACITY {
            self.image_cache.remove(0);
        }
        self.image_cache
            .push((image.rgba8_premul.clone(), paint.clone()));
        Ok(paint)
    }

    fn svg_raster_for(
        &mut self,
        logo: &LogoImage,
        tree: &Arc<usvg::Tree>,
        side: u32,
    ) -> CoverResult<SourceImage> {
        if let Some((_, _, pixels)) = self
            .svg_cache
            .iter()
            .find(|(t, s, _)| *s == side && Arc::ptr_eq(t, tree))
        {
            return Ok(pixels.clone());
        }

        let pixels = logo.raster_for(side)?;
        if self.svg_cache.len() >= SVG_CACHE_CAPACITY {
            self.svg_cache.remove(0);
        }
        self.svg_cache.push((tree.clone(), side, pixels.clone()));
        Ok(pixels)
    }
}

impl Surface for CpuSurface {
    fn resize(&mut self, side_px: u32) -> CoverResult<()> {
        if side_px == 0 {
            return Err(CoverError::validation("surface side length must be > 0"));
        }
        let side: u16 = side_px.try_into().map_err(|_| {
            CoverError::missing_surface_context(format!(
                "surface side {side_px} exceeds the raster limit of {}",
                u16::MAX
            ))
        })?;

        let ctx = match self.ctx.take() {
            Some(mut ctx) if ctx.width() == side && ctx.height() == side => {
                ctx.reset();
                ctx
            }
            _ => vello_cpu::RenderContext::new(side, side),
        };
        self.ctx = Some(ctx);
        self.side = side;
        Ok(())
    }

    fn side_px(&self) -> u32 {
        u32::from(self.side)
    }

    fn draw_image_region(
        &mut self,
        image: &SourceImage,
        src: SampleRect,
        dst: Rect,
    ) -> CoverResult<()> {
        if !(src.swidth > 0.0 && src.sheight > 0.0) {
            return Err(CoverError::render("image sample region is empty"));
        }
        let paint = self.image_paint_for(image)?;
        let ctx = self.ctx_mut()?;

        let transform = vello_cpu::kurbo::Affine::translate((dst.x0, dst.y0))
            * vello_cpu::kurbo::Affine::scale_non_uniform(
                dst.width() / src.swidth,
                dst.height() / src.sheight,
            )
            * vello_cpu::kurbo::Affine::translate((-src.sx, -src.sy));

        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(transform);
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            src.sx,
            src.sy,
            src.sx + src.swidth,
            src.sy + src.sheight,
        ));
        Ok(())
    }

    fn set_fill_color(&mut self, color: Rgba8) {
        self.fill = color;
    }

    fn fill_rect(&mut self, rect: Rect) -> CoverResult<()> {
        let Rgba8 { r, g, b, a } = self.fill;
        let ctx = self.ctx_mut()?;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        Ok(())
    }

    fn set_font_size(&mut self, size_px: f64) {
        self.font_size = size_px;
    }

    fn measure_text_width(&mut self, text: &str) -> CoverResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let size = self.font_size as f32;
        Ok(f64::from(self.shaper_mut()?.measure(text, size)?))
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> CoverResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let size = self.font_size as f32;
        let shaped = self.shaper_mut()?.shape_line(text, size)?;
        let font = self
            .font_data
            .clone()
            .ok_or_else(|| CoverError::validation("no caption font loaded"))?;

        let Rgba8 { r, g, b, a } = self.fill;
        let ctx = self.ctx_mut()?;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));

        let (ox, oy) = (x as f32, y as f32);
        let glyphs = shaped.glyphs.iter().map(|&(id, gx, gy)| vello_cpu::Glyph {
            id,
            x: ox + gx,
            y: oy + gy,
        });
        ctx.glyph_run(&font).font_size(size).fill_glyphs(glyphs);
        Ok(())
    }

    fn draw_logo(&mut self, logo: &LogoImage, dst: Rect) -> CoverResult<()> {
        let pixels = match logo {
            LogoImage::Raster(pixels) => pixels.clone(),
            LogoImage::Svg(tree) => self.svg_raster_for(logo, tree, dst.width().ceil() as u32)?,
        };
        self.draw_image_region(&pixels, SampleRect::whole(&pixels), dst)
    }
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CoverResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CoverError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CoverError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(CoverError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
