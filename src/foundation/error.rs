/// Convenience result type used across covergen.
pub type CoverResult<T> = Result<T, CoverError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum CoverError {
    /// Invalid caller-provided data (side lengths, crop rectangles, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// The provided bytes or media type are not an image.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// The drawing surface cannot produce a 2D context.
    #[error("missing surface context: {0}")]
    MissingSurfaceContext(String),

    /// Errors while decoding or rasterizing an image resource.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors raised by a surface while drawing.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoverError {
    /// Build a [`CoverError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CoverError::UnsupportedInput`] value.
    pub fn unsupported_input(msg: impl Into<String>) -> Self {
        Self::UnsupportedInput(msg.into())
    }

    /// Build a [`CoverError::MissingSurfaceContext`] value.
    pub fn missing_surface_context(msg: impl Into<String>) -> Self {
        Self::MissingSurfaceContext(msg.into())
    }

    /// Build a [`CoverError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CoverError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
