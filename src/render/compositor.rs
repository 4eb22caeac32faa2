use crate::assets::fonts::{FaceId, FaceStyle, FontBook};
use crate::assets::store::ImageStore;
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{PosterError, PosterResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::layers::{
    ImagePaintCache, LayerResources, PlaceholderStyle, render_background, render_photo_layer,
    render_text_layer,
};
use crate::render::painter::Painter;
use crate::scene::model::{LayerRef, Scene};
use crate::text::shaper::TextShaper;

/// A rendered poster as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterSurface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl RasterSurface {
    /// Pixel at `(x, y)` as stored, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

/// Options for [`Compositor`].
#[derive(Clone, Debug, Default)]
pub struct CompositorOpts {
    pub(crate) clear_rgba: Option<[u8; 4]>,
    pub(crate) placeholder: PlaceholderStyle,
}

impl CompositorOpts {
    /// Return options with a straight-alpha color painted under every layer.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }

    /// Return options with a different empty-slot and photo border look.
    pub fn with_placeholder_style(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder = style;
        self
    }
}

/// Turns a [`Scene`] plus its images into pixels.
///
/// A compositor owns the font book and caches derived from it (shaping contexts, image paints).
/// Caches are keyed so that they can only save work; the output of [`Compositor::render`]
/// depends on the scene, the image store and the registered fonts alone.
pub struct Compositor {
    opts: CompositorOpts,
    fonts: FontBook,
    shaper: TextShaper,
    paints: ImagePaintCache,
}

impl Compositor {
    /// Compositor with default options.
    pub fn new(fonts: FontBook) -> Self {
        Self::with_opts(fonts, CompositorOpts::default())
    }

    /// Compositor with explicit options.
    pub fn with_opts(fonts: FontBook, opts: CompositorOpts) -> Self {
        Self {
            opts,
            fonts,
            shaper: TextShaper::new(),
            paints: ImagePaintCache::default(),
        }
    }

    /// Registered fonts.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Register another face; later renders can use it.
    pub fn register_font(
        &mut self,
        family: impl Into<String>,
        style: FaceStyle,
        bytes: Vec<u8>,
    ) -> PosterResult<FaceId> {
        self.fonts.register(family, style, bytes)
    }

    /// Family used when a descriptor's own stack has no registered face.
    pub fn set_fallback_font(&mut self, family: impl Into<String>) {
        self.fonts.set_fallback(family);
    }

    /// Render `scene` bottom to top into a fresh premultiplied surface.
    ///
    /// Only an invalid scene fails the render. A layer that errors is logged and left out.
    #[tracing::instrument(
        skip_all,
        fields(
            width = scene.canvas.width,
            height = scene.canvas.height,
            texts = scene.texts.len()
        )
    )]
    pub fn render(&mut self, scene: &Scene, images: &ImageStore) -> PosterResult<RasterSurface> {
        scene.validate()?;
        let (w, h) = scene.canvas.size_u16()?;
        let mut painter = Painter::new(w, h);

        if let Some([r, g, b, a]) = self.opts.clear_rgba {
            painter.fill_rect(
                Rect::new(0.0, 0.0, painter.width(), painter.height()),
                Rgba8::new(r, g, b, a),
            );
        }

        self.paints.retain_keys(images);
        let mut res = LayerResources {
            images,
            fonts: &self.fonts,
            shaper: &mut self.shaper,
            paints: &mut self.paints,
            placeholder: &self.opts.placeholder,
        };

        for layer in scene.layers() {
            let out = painter.scoped(|p| match layer {
                LayerRef::Background(bg) => render_background(p, bg, &mut res),
                LayerRef::Photo(photo) => render_photo_layer(p, photo, &mut res),
                LayerRef::Text(_, text) => render_text_layer(p, text, &mut res),
            });
            if let Err(e) = out {
                log_skipped_layer(layer, &e);
            }
        }

        Ok(RasterSurface {
            width: scene.canvas.width,
            height: scene.canvas.height,
            data: painter.finish(),
            premultiplied: true,
        })
    }
}

fn log_skipped_layer(layer: LayerRef<'_>, err: &PosterError) {
    match layer {
        LayerRef::Background(_) => tracing::warn!(error = %err, "background layer skipped"),
        LayerRef::Photo(_) => tracing::warn!(error = %err, "photo layer skipped"),
        LayerRef::Text(idx, _) => tracing::warn!(index = idx, error = %err, "text layer skipped"),
    }
}

/// One-shot render with a throwaway [`Compositor`].
pub fn render_scene(
    scene: &Scene,
    images: &ImageStore,
    fonts: &FontBook,
) -> PosterResult<RasterSurface> {
    Compositor::new(fonts.clone()).render(scene, images)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
