//! Covergen composes square cover images: a cropped photo, two decorative bars, a
//! bottom-anchored wrapped caption and an optional logo.
//!
//! # Pipeline overview
//!
//! 1. **Load**: bytes are sniffed and decoded into a premultiplied [`SourceImage`]
//! 2. **Resolve**: the crop (or a centered square) becomes a [`SampleRect`]
//! 3. **Lay out**: [`CoverGeometry`] scales every element proportionally to the side length
//! 4. **Compose**: [`render_cover`] draws onto any [`Surface`] in a fixed order
//! 5. **Export** (optional): the export surface is read back and encoded as JPEG
//!
//! A [`CoverSession`] ties these together for interactive use: it tracks unsaved edits and
//! discards render or load completions that were overtaken by newer requests.
//!
//! All geometry is expressed as fractions of the cover side, so a preview and an export of
//! different sizes are congruent.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod composition;
mod encode;
mod foundation;
mod layout;
mod render;
mod session;

pub use assets::decode::{
    SourceImage, UNSUPPORTED_INPUT_MSG, decode_image, sniff_image_format, validate_media_type,
};
pub use assets::font::{CaptionFont, ShapedLine, TextShaper};
pub use assets::logo::LogoImage;
pub use composition::config::EngineConfig;
pub use composition::style::StyleConfig;
pub use encode::export::{
    FALLBACK_SLUG, encode_jpeg, encode_png, export_file_name, slugify_name, write_output,
};
pub use foundation::color::Rgba8;
pub use foundation::core::{Point, Rect, SurfaceRole, SurfaceSpec};
pub use foundation::error::{CoverError, CoverResult};
pub use layout::crop::{CropRect, SampleRect, resolve_sample_rect};
pub use layout::geometry::{
    BOTTOM_BAR_PERCENT, CAPTION_FONT_RATIO, CoverGeometry, LOGO_PADDING_PERCENT,
    LOGO_SIZE_PERCENT, SIDE_BAR_PERCENT,
};
pub use layout::sizer::{DEFAULT_EXPORT_SIDE, DEFAULT_PREVIEW_MARGIN, OutputSizer};
pub use layout::wrap::{WrappedLine, try_wrap_text, wrap_text};
pub use render::compositor::{CoverInputs, CoverLayout, render_cover};
pub use render::cpu::CpuSurface;
pub use render::recording::{DrawCall, RecordingSurface};
pub use render::surface::{CoverFrame, Surface};
pub use session::render_session::{
    CoverSession, LoadOutcome, LoadTicket, PendingRender, RenderOutcome, RenderTrigger,
};
