//! Scene description: canvas, layer stack, user edits and built-in templates.

pub(crate) mod edit;
pub(crate) mod model;
pub(crate) mod templates;
