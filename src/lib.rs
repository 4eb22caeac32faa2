//! posterkit composes posters from a layered scene and rasterizes them deterministically.
//!
//! A [`Scene`] holds a canvas and a fixed layer stack: a background (cover-fitted image or
//! procedural fill), an optional clipped user photo, and any number of text layers. The
//! [`Compositor`] turns a scene plus an [`ImageStore`] and a [`FontBook`] into a
//! [`RasterSurface`], and [`export_png`] encodes that surface.
//!
//! - Build a scene from JSON ([`Scene::from_json_str`]) or a template ([`TemplateKind`])
//! - Register fonts and decode images
//! - Render with [`Compositor::render`] or [`render_scene`], or drive edits with a
//!   [`PosterSession`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod export;
pub(crate) mod geometry;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod session;
pub(crate) mod text;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{PosterError, PosterResult};

pub use crate::assets::color::ColorDef;
pub use crate::assets::decode::decode_image;
pub use crate::assets::fonts::{FaceId, FaceStyle, FontBook};
pub use crate::assets::store::{
    ImageStore, MAX_IMAGE_EXTENT, RasterImage, UPLOAD_DECODE_FAILED_MESSAGE,
    UPLOAD_INVALID_TYPE_MESSAGE,
};
pub use crate::export::png::{export_png, write_png};
pub use crate::geometry::fit::{CoverFit, cover_fit};
pub use crate::geometry::placement::{PhotoPlacement, centered_affine_placement};
pub use crate::render::compositor::{Compositor, CompositorOpts, RasterSurface, render_scene};
pub use crate::render::layers::PlaceholderStyle;
pub use crate::scene::edit::{RegionField, TextField, TransformField, parse_numeric_input};
pub use crate::scene::model::{
    BackgroundFill, BackgroundLayer, DEFAULT_LINE_HEIGHT, DEFAULT_PLACEHOLDER_CAPTION,
    HorizontalAlign, LayerRef, MIN_FONT_SIZE_PX, MIN_PHOTO_SCALE, MIN_REGION_EXTENT, Ornament,
    PhotoLayer, PhotoTransform, PlaceholderRegion, Scene, TextBaseline, TextLayer,
};
pub use crate::scene::templates::{
    BACKGROUND_IMAGE_KEY, DEFAULT_EXAMPLE, DEFAULT_MEANING, DEFAULT_WORD, PHOTO_IMAGE_KEY,
    TemplateKind, campaign_poster, word_of_the_day,
};
pub use crate::session::poster_session::{ImageSlot, PosterSession};
pub use crate::text::font::{FontDescriptor, FontWeight, GENERIC_FALLBACK_STACK};
pub use crate::text::shaper::{ShapedLine, TextShaper};
pub use crate::text::wrap::{
    LinePlacement, PlannedLine, WrappedLine, aligned_origin_x, layout_vertical, plan_text_layer,
    simple_lines, wrap_and_measure,
};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
