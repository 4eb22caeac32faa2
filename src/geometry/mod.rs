//! Pure placement math shared by the layer renderer.

pub(crate) mod fit;
pub(crate) mod placement;
