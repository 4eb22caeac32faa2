use std::sync::Arc;

use anyhow::Context;

use crate::assets::store::{RasterImage, check_image_extent};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decode encoded image bytes (PNG, JPEG) into a premultiplied [`RasterImage`].
pub fn decode_image(bytes: &[u8]) -> PosterResult<RasterImage> {
    if bytes.is_empty() {
        return Err(PosterError::decode("image data is empty"));
    }

    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| PosterError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PosterError::decode("decoded image has zero size"));
    }
    check_image_extent(width, height).map_err(PosterError::decode)?;

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(RasterImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
