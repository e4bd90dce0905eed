use crate::{
    assets::{decode::SourceImage, logo::LogoImage},
    composition::{config::EngineConfig, style::StyleConfig},
    encode::export::export_file_name,
    foundation::{
        core::SurfaceSpec,
        error::{CoverError, CoverResult},
    },
    layout::{crop::CropRect, sizer::OutputSizer},
    render::{
        compositor::{CoverInputs, CoverLayout, render_cover},
        surface::Surface,
    },
};

/// UI event that asked for a redraw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderTrigger {
    /// A new source image finished loading.
    SourceLoaded,
    /// The crop widget finished an interaction.
    CropEnd,
    /// A style input changed.
    StyleEdit,
    /// The container was resized.
    Resize,
}

impl RenderTrigger {
    /// Whether this trigger counts as an unsaved edit.
    pub fn marks_change(self) -> bool {
        !matches!(self, Self::Resize)
    }
}

/// Handle for an in-flight source decode.
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Result of delivering a decoded source to the session.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The image replaced the current one; render with the pending request.
    Installed(PendingRender),
    /// A newer load started after this one; the image was dropped.
    Superseded,
}

/// Render request captured at event time, completed once the surfaces are ready.
///
/// Snapshots image, crop and style so later edits cannot leak into it.
#[derive(Clone, Debug)]
pub struct PendingRender {
    generation: u64,
    trigger: RenderTrigger,
    image: SourceImage,
    crop: Option<CropRect>,
    style: StyleConfig,
    preview: SurfaceSpec,
    export: SurfaceSpec,
}

impl PendingRender {
    /// Request generation; only the latest one is ever drawn.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Event that produced this request.
    pub fn trigger(&self) -> RenderTrigger {
        self.trigger
    }

    /// Style captured for this request.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Preview surface for this request.
    pub fn preview_spec(&self) -> SurfaceSpec {
        self.preview
    }

    /// Export surface for this request.
    pub fn export_spec(&self) -> SurfaceSpec {
        self.export
    }
}

/// Result of completing a [`PendingRender`].
#[derive(Debug)]
pub enum RenderOutcome {
    /// Both surfaces now hold the composed cover.
    Rendered {
        /// Preview layout.
        preview: CoverLayout,
        /// Export layout.
        export: CoverLayout,
    },
    /// A newer request exists; the surfaces were left untouched.
    Superseded {
        /// Generation of the dropped request.
        generation: u64,
        /// Latest requested generation.
        latest: u64,
    },
}

/// Editing session: owns the source, crop, style and change tracking, and gates renders
/// on request generations so stale completions never reach the surfaces.
#[derive(Debug)]
pub struct CoverSession {
    sizer: OutputSizer,
    container_width: u32,
    image: Option<SourceImage>,
    crop: Option<CropRect>,
    style: StyleConfig,
    logo: Option<LogoImage>,
    load_generation: u64,
    render_generation: u64,
    unsaved: bool,
}

impl CoverSession {
    /// New session for a container of `container_width` pixels.
    pub fn new(config: &EngineConfig, container_width: u32) -> CoverResult<Self> {
        config.validate()?;
        Ok(Self {
            sizer: config.sizer()?,
            container_width,
            image: None,
            crop: None,
            style: StyleConfig::default(),
            logo: None,
            load_generation: 0,
            render_generation: 0,
            unsaved: false,
        })
    }

    /// Current source image, if one is loaded.
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Current crop; `None` means the centered square.
    pub fn crop(&self) -> Option<&CropRect> {
        self.crop.as_ref()
    }

    /// Current style.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Whether edits happened since the last export.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Clear the unsaved-changes flag after a successful export.
    pub fn mark_saved(&mut self) {
        self.unsaved = false;
    }

    /// Download name for the current caption.
    pub fn export_file_name(&self) -> String {
        export_file_name(&self.style.caption)
    }

    /// Preview and export surfaces for the current container width.
    pub fn surface_specs(&self) -> CoverResult<(SurfaceSpec, SurfaceSpec)> {
        Ok((
            self.sizer.preview_spec(self.container_width)?,
            self.sizer.export_spec()?,
        ))
    }

    /// Replace the logo overlay; redraws when the logo is shown.
    pub fn set_logo(&mut self, logo: Option<LogoImage>) -> CoverResult<Option<PendingRender>> {
        self.logo = logo;
        if !self.style.show_logo {
            return Ok(None);
        }
        self.request_render(RenderTrigger::StyleEdit)
    }

    /// Start loading a new source; only the latest ticket can install its image.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket {
            generation: self.load_generation,
        }
    }

    /// Deliver a finished decode.
    ///
    /// The latest load replaces the image, drops the crop and requests a render. A stale
    /// load is ignored, including its decode error.
    #[tracing::instrument(skip(self, decoded), fields(ticket = ticket.generation))]
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        decoded: CoverResult<SourceImage>,
    ) -> CoverResult<LoadOutcome> {
        if ticket.generation != self.load_generation {
            tracing::debug!(latest = self.load_generation, "discarding stale load");
            return Ok(LoadOutcome::Superseded);
        }
        let image = decoded?;

        self.image = Some(image);
        self.crop = None;
        let pending = self
            .request_render(RenderTrigger::SourceLoaded)?
            .ok_or_else(|| CoverError::render("no image after install"))?;
        Ok(LoadOutcome::Installed(pending))
    }

    /// Decode-free shorthand for loading an already decoded image.
    pub fn load_image(&mut self, image: SourceImage) -> CoverResult<PendingRender> {
        let ticket = self.begin_load();
        match self.finish_load(ticket, Ok(image))? {
            LoadOutcome::Installed(pending) => Ok(pending),
            LoadOutcome::Superseded => Err(CoverError::render("fresh load was superseded")),
        }
    }

    /// Apply a crop widget payload (validated against the current image).
    pub fn set_crop(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> CoverResult<Option<PendingRender>> {
        let image = self
            .image
            .as_ref()
            .ok_or_else(|| CoverError::validation("cannot crop before an image is loaded"))?;
        let crop = CropRect::new(x, y, width, height, image.width, image.height)?;
        self.crop = Some(crop);
        self.request_render(RenderTrigger::CropEnd)
    }

    /// Edit the style and request a redraw.
    pub fn update_style(
        &mut self,
        edit: impl FnOnce(&mut StyleConfig),
    ) -> CoverResult<Option<PendingRender>> {
        edit(&mut self.style);
        self.request_render(RenderTrigger::StyleEdit)
    }

    /// Track a new container width and request a redraw.
    ///
    /// A container too narrow for a preview is rejected and the previous width is kept.
    pub fn resize(&mut self, container_width: u32) -> CoverResult<Option<PendingRender>> {
        self.sizer.preview_spec(container_width)?;
        self.container_width = container_width;
        self.request_render(RenderTrigger::Resize)
    }

    /// Capture a render request. `None` when no image is loaded.
    #[tracing::instrument(skip(self))]
    pub fn request_render(&mut self, trigger: RenderTrigger) -> CoverResult<Option<PendingRender>> {
        let Some(image) = self.image.clone() else {
            tracing::debug!("no source image; nothing to render");
            return Ok(None);
        };
        // Edits are already applied; count them even when the surfaces cannot be sized.
        if trigger.marks_change() {
            self.unsaved = true;
        }
        self.render_generation += 1;
        let (preview, export) = self.surface_specs()?;

        Ok(Some(PendingRender {
            generation: self.render_generation,
            trigger,
            image,
            crop: self.crop,
            style: self.style.clone(),
            preview,
            export,
        }))
    }

    /// Draw a pending request onto both surfaces if it is still the latest.
    #[tracing::instrument(skip_all, fields(generation = pending.generation))]
    pub fn complete(
        &self,
        pending: &PendingRender,
        preview: &mut dyn Surface,
        export: &mut dyn Surface,
    ) -> CoverResult<RenderOutcome> {
        if pending.generation != self.render_generation {
            tracing::debug!(latest = self.render_generation, "discarding stale render");
            return Ok(RenderOutcome::Superseded {
                generation: pending.generation,
                latest: self.render_generation,
            });
        }

        let inputs = CoverInputs {
            image: &pending.image,
            crop: pending.crop.as_ref(),
            style: &pending.style,
            logo: self.logo.as_ref(),
        };
        let preview = render_cover(preview, pending.preview, inputs)?;
        let export = render_cover(export, pending.export, inputs)?;
        Ok(RenderOutcome::Rendered { preview, export })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
