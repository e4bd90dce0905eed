use crate::foundation::{
    core::SurfaceSpec,
    error::{CoverError, CoverResult},
};

/// Export side length used when no config overrides it.
pub const DEFAULT_EXPORT_SIDE: u32 = 500;
/// Horizontal margin subtracted from the container width for the preview.
pub const DEFAULT_PREVIEW_MARGIN: u32 = 32;

/// Derives the preview and export surface sizes.
///
/// The export side is fixed; the preview follows the container and never exceeds it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputSizer {
    export_side: u32,
    margin: u32,
}

impl Default for OutputSizer {
    fn default() -> Self {
        Self {
            export_side: DEFAULT_EXPORT_SIDE,
            margin: DEFAULT_PREVIEW_MARGIN,
        }
    }
}

impl OutputSizer {
    /// Build a sizer with an explicit export side and preview margin.
    pub fn new(export_side: u32, margin: u32) -> CoverResult<Self> {
        if export_side == 0 {
            return Err(CoverError::validation("export side must be > 0"));
        }
        Ok(Self {
            export_side,
            margin,
        })
    }

    /// Fixed export side length.
    pub fn export_side(&self) -> u32 {
        self.export_side
    }

    /// Margin subtracted from the container width.
    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// `min(container_width - margin, export_side)`, saturating at zero.
    pub fn preview_side(&self, container_width: u32) -> u32 {
        container_width
            .saturating_sub(self.margin)
            .min(self.export_side)
    }

    /// Preview surface for a container; fails when the container leaves no room.
    pub fn preview_spec(&self, container_width: u32) -> CoverResult<SurfaceSpec> {
        SurfaceSpec::preview(self.preview_side(container_width)).map_err(|_| {
            CoverError::validation(format!(
                "container width {container_width} leaves no room for a preview (margin {})",
                self.margin
            ))
        })
    }

    /// Export surface.
    pub fn export_spec(&self) -> CoverResult<SurfaceSpec> {
        SurfaceSpec::export(self.export_side)
    }
}
