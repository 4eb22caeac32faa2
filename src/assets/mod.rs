//! Inputs the renderer reads but never owns: colors, decoded images and font faces.

pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod fonts;
pub(crate) mod store;
