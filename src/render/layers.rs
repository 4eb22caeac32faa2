use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::assets::color::ColorDef;
use crate::assets::fonts::FontBook;
use crate::assets::store::{ImageStore, RasterImage};
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::{PosterError, PosterResult};
use crate::geometry::fit::cover_fit;
use crate::geometry::placement::centered_affine_placement;
use crate::render::painter::{Painter, image_paint_from_premul};
use crate::scene::model::{
    BackgroundFill, BackgroundLayer, HorizontalAlign, Ornament, PhotoLayer, TextBaseline,
    TextLayer,
};
use crate::text::font::FontDescriptor;
use crate::text::shaper::TextShaper;
use crate::text::wrap::plan_text_layer;

/// Look of the empty photo slot and of the border around a placed photo.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderStyle {
    /// Dashed outline color.
    pub outline: Rgba8,
    /// Dash and gap lengths.
    pub dash: [f64; 2],
    /// Outline and border stroke width.
    pub stroke_width: f64,
    /// Caption color.
    pub caption_color: Rgba8,
    /// Caption size in pixels.
    pub caption_size_px: f64,
    /// Caption font family.
    pub caption_family: String,
    /// Border drawn around a placed photo.
    pub border: Rgba8,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            outline: Rgba8::new(255, 255, 255, 153),
            dash: [8.0, 6.0],
            stroke_width: 2.0,
            caption_color: Rgba8::new(255, 255, 255, 204),
            caption_size_px: 14.0,
            caption_family: "Poppins".to_owned(),
            border: Rgba8::new(255, 255, 255, 179),
        }
    }
}

/// Image paints keyed by store key; an entry is reused only while it wraps the same image.
#[derive(Default)]
pub(crate) struct ImagePaintCache {
    entries: HashMap<String, (Arc<RasterImage>, vello_cpu::Image)>,
}

impl ImagePaintCache {
    pub(crate) fn paint_for(
        &mut self,
        key: &str,
        image: &Arc<RasterImage>,
    ) -> PosterResult<vello_cpu::Image> {
        if let Some((cached, paint)) = self.entries.get(key)
            && Arc::ptr_eq(cached, image)
        {
            return Ok(paint.clone());
        }

        let paint = image_paint_from_premul(&image.rgba8_premul, image.width, image.height)?;
        self.entries
            .insert(key.to_owned(), (Arc::clone(image), paint.clone()));
        Ok(paint)
    }

    pub(crate) fn retain_keys(&mut self, images: &ImageStore) {
        self.entries.retain(|k, _| images.contains(k));
    }
}

/// Everything a layer may read besides the painter.
pub(crate) struct LayerResources<'a> {
    pub(crate) images: &'a ImageStore,
    pub(crate) fonts: &'a FontBook,
    pub(crate) shaper: &'a mut TextShaper,
    pub(crate) paints: &'a mut ImagePaintCache,
    pub(crate) placeholder: &'a PlaceholderStyle,
}

fn resolve_image<'a, 'k>(
    images: &'a ImageStore,
    key: Option<&'k str>,
    layer: &str,
) -> Option<(&'k str, &'a Arc<RasterImage>)> {
    let key = key?;
    match images.get(key) {
        Some(image) => Some((key, image)),
        None => {
            tracing::debug!(layer, key, "image not in store; drawing fallback");
            None
        }
    }
}

/// Cover-fit image, or the procedural fill when the image is absent.
pub(crate) fn render_background(
    p: &mut Painter,
    bg: &BackgroundLayer,
    res: &mut LayerResources<'_>,
) -> PosterResult<()> {
    if let Some((key, image)) = resolve_image(res.images, bg.image.as_deref(), "background") {
        let prepared = cover_fit(
            p.width(),
            p.height(),
            f64::from(image.width),
            f64::from(image.height),
        )
        .ok_or_else(|| PosterError::render("background image has degenerate size"))
        .and_then(|fit| Ok((fit, res.paints.paint_for(key, image)?)));
        match prepared {
            Ok((fit, paint)) => {
                return p.scoped(|p| {
                    p.concat(fit.to_affine());
                    p.draw_image(paint, image.width, image.height);
                    Ok(())
                });
            }
            Err(e) => {
                tracing::debug!(key, error = %e, "background image unusable; drawing fill");
            }
        }
    }

    match &bg.fill {
        BackgroundFill::Gradient { top, bottom } => {
            render_vertical_gradient(p, top.to_rgba8(), bottom.to_rgba8());
            Ok(())
        }
        BackgroundFill::Solid { color, ornaments } => {
            p.fill_rect(Rect::new(0.0, 0.0, p.width(), p.height()), color.to_rgba8());
            for ornament in ornaments {
                render_ornament(p, ornament, res)?;
            }
            Ok(())
        }
    }
}

/// One solid band per pixel row: row 0 is `top`, the last row is `bottom`.
fn render_vertical_gradient(p: &mut Painter, top: Rgba8, bottom: Rgba8) {
    let w = p.width();
    let rows = p.height() as u32;
    let last = rows.saturating_sub(1);
    for y in 0..rows {
        let t = if last == 0 {
            0.0
        } else {
            f64::from(y) / f64::from(last)
        };
        let y0 = f64::from(y);
        p.fill_rect(Rect::new(0.0, y0, w, y0 + 1.0), top.lerp(bottom, t));
    }
}

fn render_ornament(
    p: &mut Painter,
    ornament: &Ornament,
    res: &mut LayerResources<'_>,
) -> PosterResult<()> {
    if ornament.glyph.trim().is_empty() || !(ornament.size_px > 0.0) {
        return Ok(());
    }
    let desc = FontDescriptor::new(ornament.font_family.clone(), ornament.size_px);
    let Some(face) = res.fonts.resolve(&desc) else {
        tracing::warn!(family = %ornament.font_family, "no font face for ornament; skipped");
        return Ok(());
    };

    let line = res
        .shaper
        .shape_line(res.fonts, face, &ornament.glyph, ornament.size_px)?;
    let font = res.shaper.font_data(res.fonts, face)?;
    let color = ornament.color.to_rgba8();

    p.scoped(|p| {
        p.concat(
            Affine::translate((ornament.x, ornament.y))
                * Affine::rotate(ornament.rotation_deg.to_radians()),
        );
        let origin = Point::new(-line.width / 2.0, middle_to_baseline(line.ascent, line.descent));
        p.draw_glyphs(&font, line.font_size, &line.glyphs, origin, color);
        Ok(())
    })
}

/// Offset from the vertical middle of a line box to its baseline.
fn middle_to_baseline(ascent: f64, descent: f64) -> f64 {
    (ascent - descent) / 2.0
}

/// Clipped, transformed photo with a border, or the dashed placeholder.
pub(crate) fn render_photo_layer(
    p: &mut Painter,
    layer: &PhotoLayer,
    res: &mut LayerResources<'_>,
) -> PosterResult<()> {
    let region = layer.region.rect();
    let style = res.placeholder;

    let Some((key, image)) = resolve_image(res.images, layer.image.as_deref(), "photo") else {
        return render_placeholder(p, layer, res);
    };

    let placement = centered_affine_placement(
        &layer.region,
        &layer.transform,
        f64::from(image.width),
        f64::from(image.height),
    );
    let paint = match res.paints.paint_for(key, image) {
        Ok(paint) => paint,
        Err(e) => {
            tracing::debug!(key, error = %e, "photo image unusable; drawing placeholder");
            return render_placeholder(p, layer, res);
        }
    };
    p.scoped(|p| {
        p.push_clip_rect(region);
        p.concat(placement.to_affine());
        p.draw_image(paint, image.width, image.height);
        Ok(())
    })?;

    p.stroke_rect(region, style.stroke_width, style.border);
    Ok(())
}

fn dashed_outline(rect: Rect, dash: &[f64]) -> BezPath {
    kurbo::dash(rect.path_elements(0.1), 0.0, dash).collect()
}

fn render_placeholder(
    p: &mut Painter,
    layer: &PhotoLayer,
    res: &mut LayerResources<'_>,
) -> PosterResult<()> {
    let style = res.placeholder;
    let region = layer.region.rect();
    p.stroke_path(
        &dashed_outline(region, &style.dash),
        style.stroke_width,
        style.outline,
    );

    if layer.caption.trim().is_empty() {
        return Ok(());
    }
    let mut caption = TextLayer::new(
        layer.caption.clone(),
        style.caption_family.clone(),
        style.caption_size_px,
        layer.region.center().to_vec2(),
    );
    caption.align = HorizontalAlign::Center;
    caption.color = ColorDef::rgba8(
        style.caption_color.r,
        style.caption_color.g,
        style.caption_color.b,
        f64::from(style.caption_color.a) / 255.0,
    );
    if res.fonts.resolve(&caption.font_descriptor()).is_none() {
        tracing::debug!(family = %style.caption_family, "no font for placeholder caption");
        return Ok(());
    }
    render_text_layer(p, &caption, res)
}

/// Draw every line of a text layer. Missing fonts skip the layer with a warning.
pub(crate) fn render_text_layer(
    p: &mut Painter,
    layer: &TextLayer,
    res: &mut LayerResources<'_>,
) -> PosterResult<()> {
    if layer.is_blank() {
        return Ok(());
    }

    let desc = layer.font_descriptor();
    let Some(face) = res.fonts.resolve(&desc) else {
        tracing::warn!(font = %desc.css(), "no registered font face matches; text layer skipped");
        return Ok(());
    };
    let size = layer.font_size_px();

    let mut measure_err = None;
    let plan = {
        let fonts = res.fonts;
        let shaper = &mut *res.shaper;
        plan_text_layer(layer, |s| match shaper.measure(fonts, face, s, size) {
            Ok(w) => w,
            Err(e) => {
                measure_err.get_or_insert(e);
                0.0
            }
        })
    };
    if let Some(e) = measure_err {
        return Err(e);
    }

    let font = res.shaper.font_data(res.fonts, face)?;
    let color = layer.color.to_rgba8();
    for line in plan.iter().filter(|l| !l.text.is_empty()) {
        let shaped = res.shaper.shape_line(res.fonts, face, &line.text, size)?;
        let baseline = match layer.baseline {
            TextBaseline::Alphabetic => line.baseline_y,
            TextBaseline::Middle => {
                line.baseline_y + middle_to_baseline(shaped.ascent, shaped.descent)
            }
        };
        p.draw_glyphs(
            &font,
            shaped.font_size,
            &shaped.glyphs,
            Point::new(line.origin_x, baseline),
            color,
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
