//! CPU raster backend powered by `vello_cpu`.
//!
//! [`compositor`] drives a render; [`layers`] draws one layer kind each through the
//! save/restore [`painter`].

pub(crate) mod compositor;
pub(crate) mod layers;
pub(crate) mod painter;
