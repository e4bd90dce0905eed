use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{CoverError, CoverResult},
    layout::sizer::{DEFAULT_EXPORT_SIDE, DEFAULT_PREVIEW_MARGIN, OutputSizer},
};

/// Engine-level settings that do not change while editing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Side length of the exported cover in pixels.
    pub export_side: u32,
    /// Margin subtracted from the container width for the preview.
    pub preview_margin: u32,
    /// JPEG quality for exports (1..=100).
    pub jpeg_quality: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            export_side: DEFAULT_EXPORT_SIDE,
            preview_margin: DEFAULT_PREVIEW_MARGIN,
            jpeg_quality: 100,
        }
    }
}

impl EngineConfig {
    /// Reject values the engine cannot honor.
    pub fn validate(&self) -> CoverResult<()> {
        if self.export_side == 0 {
            return Err(CoverError::validation("export_side must be > 0"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(CoverError::validation("jpeg_quality must be in 1..=100"));
        }
        Ok(())
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> CoverResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&raw)
            .map_err(|e| CoverError::validation(format!("invalid config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Output sizer for these settings.
    pub fn sizer(&self) -> CoverResult<OutputSizer> {
        OutputSizer::new(self.export_side, self.preview_margin)
    }
}
