use crate::foundation::error::{CoverError, CoverResult};

pub use kurbo::{Point, Rect};

/// Which target a surface feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceRole {
    /// Small on-screen surface sized from the container width.
    Preview,
    /// Fixed-size off-screen surface that gets encoded and downloaded.
    Export,
}

/// Square target surface description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSpec {
    /// Side length in pixels (> 0).
    pub side_px: u32,
    /// Target role.
    pub role: SurfaceRole,
}

impl SurfaceSpec {
    /// Build a spec, rejecting a zero side length.
    pub fn new(side_px: u32, role: SurfaceRole) -> CoverResult<Self> {
        if side_px == 0 {
            return Err(CoverError::validation("surface side length must be > 0"));
        }
        Ok(Self { side_px, role })
    }

    /// Shorthand for a preview surface.
    pub fn preview(side_px: u32) -> CoverResult<Self> {
        Self::new(side_px, SurfaceRole::Preview)
    }

    /// Shorthand for an export surface.
    pub fn export(side_px: u32) -> CoverResult<Self> {
        Self::new(side_px, SurfaceRole::Export)
    }

    /// Side length as `f64` for geometry.
    pub fn side(self) -> f64 {
        f64::from(self.side_px)
    }
}

/// Reject non-finite or non-positive side lengths.
pub(crate) fn ensure_side(side: f64) -> CoverResult<f64> {
    if !side.is_finite() || side <= 0.0 {
        return Err(CoverError::validation(format!(
            "side length must be finite and > 0, got {side}"
        )));
    }
    Ok(side)
}
