//! Output encoders for rendered surfaces.

pub(crate) mod png;
