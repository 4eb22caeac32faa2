use std::collections::BTreeMap;
use std::sync::Arc;

use crate::assets::decode::decode_image;
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Shown when an upload does not declare an image media type.
pub const UPLOAD_INVALID_TYPE_MESSAGE: &str = "Please upload a valid image file (JPEG or PNG).";
/// Shown when upload bytes fail to decode.
pub const UPLOAD_DECODE_FAILED_MESSAGE: &str =
    "Failed to load the image. Please try another file.";
/// Largest image width or height the raster backend can paint.
pub const MAX_IMAGE_EXTENT: u32 = u16::MAX as u32;

pub(crate) fn check_image_extent(width: u32, height: u32) -> Result<(), String> {
    if width > MAX_IMAGE_EXTENT || height > MAX_IMAGE_EXTENT {
        return Err(format!(
            "image {width}x{height} exceeds the {MAX_IMAGE_EXTENT}px raster limit"
        ));
    }
    Ok(())
}

/// Decoded raster image in premultiplied RGBA8, shared by reference and never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Row-major premultiplied RGBA8.
    pub(crate) rgba8_premul: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Build from straight-alpha RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> PosterResult<Self> {
        if width == 0 || height == 0 {
            return Err(PosterError::validation("image width and height must be > 0"));
        }
        check_image_extent(width, height).map_err(PosterError::validation)?;
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| PosterError::validation("image dimensions overflow"))?;
        if rgba8.len() != expected {
            return Err(PosterError::validation(format!(
                "image data has {} bytes, expected {expected} for {width}x{height} RGBA8",
                rgba8.len()
            )));
        }

        premultiply_rgba8_in_place(&mut rgba8);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Decoded images addressed by string keys (`"background"`, `"photo"`, ...).
///
/// Scenes refer to images by key only; a key without an entry renders the layer's fallback.
#[derive(Clone, Debug, Default)]
pub struct ImageStore {
    images: BTreeMap<String, Arc<RasterImage>>,
}

impl ImageStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the previous image.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        image: RasterImage,
    ) -> Option<Arc<RasterImage>> {
        self.images.insert(key.into(), Arc::new(image))
    }

    /// Look up an image.
    pub fn get(&self, key: &str) -> Option<&Arc<RasterImage>> {
        self.images.get(key)
    }

    /// Remove an image.
    pub fn remove(&mut self, key: &str) -> Option<Arc<RasterImage>> {
        self.images.remove(key)
    }

    /// `true` when `key` has an image.
    pub fn contains(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Validate and decode an uploaded file into `key`.
    ///
    /// A non-`image/*` media type, undecodable bytes or an image past [`MAX_IMAGE_EXTENT`]
    /// leave the store untouched; the error carries the message to show the user.
    pub fn load_upload(&mut self, key: &str, media_type: &str, bytes: &[u8]) -> PosterResult<()> {
        if !media_type.trim().to_ascii_lowercase().starts_with("image/") {
            tracing::debug!(key, media_type, "rejected upload with non-image media type");
            return Err(PosterError::validation(UPLOAD_INVALID_TYPE_MESSAGE));
        }

        let image = decode_image(bytes).map_err(|e| {
            tracing::debug!(key, error = %e, "upload failed to decode");
            PosterError::decode(UPLOAD_DECODE_FAILED_MESSAGE)
        })?;
        self.insert(key, image);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
