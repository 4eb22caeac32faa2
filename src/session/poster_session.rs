use crate::assets::fonts::{FaceId, FaceStyle, FontBook};
use crate::assets::store::ImageStore;
use crate::export::png::export_png;
use crate::foundation::error::{PosterError, PosterResult};
use crate::render::compositor::{Compositor, CompositorOpts, RasterSurface};
use crate::scene::edit::{RegionField, TextField, TransformField};
use crate::scene::model::Scene;
use crate::scene::templates::{BACKGROUND_IMAGE_KEY, PHOTO_IMAGE_KEY};

/// Image inputs a poster exposes for upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    /// Full-canvas background image.
    Background,
    /// User photo clipped to the placeholder region.
    Photo,
}

impl ImageSlot {
    /// Image store key bound to this slot.
    pub fn key(self) -> &'static str {
        match self {
            Self::Background => BACKGROUND_IMAGE_KEY,
            Self::Photo => PHOTO_IMAGE_KEY,
        }
    }
}

/// Interactive editing state: a scene, its images and the last rendered surface.
///
/// Every successful edit re-renders the whole poster, so [`PosterSession::surface`] always
/// reflects the current scene. Failed uploads keep the previous image and record a message for
/// the user in [`PosterSession::error_message`].
pub struct PosterSession {
    scene: Scene,
    images: ImageStore,
    compositor: Compositor,
    surface: RasterSurface,
    error_message: Option<String>,
}

impl PosterSession {
    /// Start a session and render the initial poster.
    pub fn new(scene: Scene, fonts: FontBook) -> PosterResult<Self> {
        Self::with_opts(scene, fonts, CompositorOpts::default())
    }

    /// Start a session with explicit compositor options.
    pub fn with_opts(scene: Scene, fonts: FontBook, opts: CompositorOpts) -> PosterResult<Self> {
        let images = ImageStore::new();
        let mut compositor = Compositor::with_opts(fonts, opts);
        let surface = compositor.render(&scene, &images)?;
        Ok(Self {
            scene,
            images,
            compositor,
            surface,
            error_message: None,
        })
    }

    /// Current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Uploaded images.
    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Most recent render.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Message from the last failed upload, cleared by the next successful one.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn rerender(&mut self) -> PosterResult<()> {
        self.surface = self.compositor.render(&self.scene, &self.images)?;
        Ok(())
    }

    /// Edit a placeholder field from raw input. Returns `true` when the poster changed.
    pub fn edit_region(&mut self, field: RegionField, raw: &str) -> PosterResult<bool> {
        let Some(photo) = self.scene.photo.as_mut() else {
            return Ok(false);
        };
        if !photo.region.apply_edit(field, raw) {
            return Ok(false);
        }
        self.rerender()?;
        Ok(true)
    }

    /// Edit a photo transform field from raw input. Returns `true` when the poster changed.
    pub fn edit_transform(&mut self, field: TransformField, raw: &str) -> PosterResult<bool> {
        let Some(photo) = self.scene.photo.as_mut() else {
            return Ok(false);
        };
        if !photo.transform.apply_edit(field, raw) {
            return Ok(false);
        }
        self.rerender()?;
        Ok(true)
    }

    /// Edit a numeric field of text layer `index`. Returns `true` when the poster changed.
    pub fn edit_text(&mut self, index: usize, field: TextField, raw: &str) -> PosterResult<bool> {
        let text = self.text_mut(index)?;
        if !text.apply_edit(field, raw) {
            return Ok(false);
        }
        self.rerender()?;
        Ok(true)
    }

    /// Replace the content of text layer `index`.
    pub fn set_text_content(&mut self, index: usize, content: impl Into<String>) -> PosterResult<()> {
        let content = content.into();
        let text = self.text_mut(index)?;
        if text.content == content {
            return Ok(());
        }
        text.content = content;
        self.rerender()
    }

    fn text_mut(&mut self, index: usize) -> PosterResult<&mut crate::scene::model::TextLayer> {
        let len = self.scene.texts.len();
        self.scene.texts.get_mut(index).ok_or_else(|| {
            PosterError::validation(format!("text layer {index} out of range ({len} layers)"))
        })
    }

    /// Apply an arbitrary scene edit. An edit that leaves the scene invalid is rolled back.
    pub fn edit_scene(&mut self, edit: impl FnOnce(&mut Scene)) -> PosterResult<()> {
        let previous = self.scene.clone();
        edit(&mut self.scene);
        if let Err(e) = self.scene.validate() {
            self.scene = previous;
            return Err(e);
        }
        self.rerender()
    }

    /// Decode an uploaded file into `slot`.
    ///
    /// On failure the previous image stays, the error carries the user-facing message and
    /// [`PosterSession::error_message`] returns it until the next successful upload.
    pub fn upload_image(
        &mut self,
        slot: ImageSlot,
        media_type: &str,
        bytes: &[u8],
    ) -> PosterResult<()> {
        let key = slot.key();
        if let Err(e) = self.images.load_upload(key, media_type, bytes) {
            tracing::warn!(?slot, error = %e, "upload rejected");
            self.error_message = Some(e.message());
            return Err(e);
        }

        self.error_message = None;
        self.bind_slot(slot);
        self.rerender()
    }

    fn bind_slot(&mut self, slot: ImageSlot) {
        let key = Some(slot.key().to_owned());
        match slot {
            ImageSlot::Background => self.scene.background.image = key,
            ImageSlot::Photo => {
                if let Some(photo) = self.scene.photo.as_mut() {
                    photo.image = key;
                }
            }
        }
    }

    /// Drop the image in `slot`; the slot falls back to its procedural look.
    pub fn remove_image(&mut self, slot: ImageSlot) -> PosterResult<bool> {
        if self.images.remove(slot.key()).is_none() {
            return Ok(false);
        }
        self.rerender()?;
        Ok(true)
    }

    /// Register a font face and re-render so text picks it up.
    pub fn register_font(
        &mut self,
        family: impl Into<String>,
        style: FaceStyle,
        bytes: Vec<u8>,
    ) -> PosterResult<FaceId> {
        let id = self.compositor.register_font(family, style, bytes)?;
        self.rerender()?;
        Ok(id)
    }

    /// PNG bytes of the current surface.
    pub fn export_png(&self) -> PosterResult<Vec<u8>> {
        export_png(&self.surface)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/poster_session.rs"]
mod tests;
