pub(crate) mod crop;
pub(crate) mod geometry;
pub(crate) mod sizer;
pub(crate) mod wrap;
