use std::collections::HashMap;

use crate::assets::fonts::{FaceId, FontBook};
use crate::foundation::error::{PosterError, PosterResult};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShapedGlyph {
    pub(crate) id: u32,
    /// Pen x relative to the line start.
    pub(crate) x: f32,
    /// Offset from the baseline (y down).
    pub(crate) y: f32,
}

/// A single shaped line, positioned relative to its own start and baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedLine {
    /// Advance width in pixels.
    pub width: f64,
    /// Distance from the baseline to the top of the line box.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f64,
    pub(crate) font_size: f32,
    pub(crate) glyphs: Vec<ShapedGlyph>,
}

struct ShaperFace {
    font_ctx: parley::FontContext,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

/// Parley-backed line shaper.
///
/// Each face gets its own font context holding only that face, so the glyph ids produced here
/// always index the same bytes the rasterizer draws with.
pub struct TextShaper {
    layout_ctx: parley::LayoutContext<()>,
    faces: HashMap<FaceId, ShaperFace>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    /// Shaper with empty caches.
    pub fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    fn face_for(&mut self, book: &FontBook, id: FaceId) -> PosterResult<&mut ShaperFace> {
        if !self.faces.contains_key(&id) {
            let face = book
                .face(id)
                .ok_or_else(|| PosterError::render("font face id is not registered"))?;

            let mut font_ctx = parley::FontContext::default();
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(face.bytes.to_vec()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                PosterError::render(format!("font data for '{}' has no families", face.family))
            })?;
            let family_name = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| PosterError::render("registered font family has no name"))?
                .to_string();

            let font = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(face.bytes.to_vec()),
                0,
            );
            self.faces.insert(
                id,
                ShaperFace {
                    font_ctx,
                    family_name,
                    font,
                },
            );
        }

        self.faces
            .get_mut(&id)
            .ok_or_else(|| PosterError::render("font face cache miss"))
    }

    /// Rasterizer handle for a face.
    pub(crate) fn font_data(
        &mut self,
        book: &FontBook,
        id: FaceId,
    ) -> PosterResult<vello_cpu::peniko::FontData> {
        Ok(self.face_for(book, id)?.font.clone())
    }

    /// Shape `text` as one unbroken line.
    pub fn shape_line(
        &mut self,
        book: &FontBook,
        id: FaceId,
        text: &str,
        size_px: f64,
    ) -> PosterResult<ShapedLine> {
        let size = size_px as f32;
        if !size.is_finite() || size <= 0.0 {
            return Err(PosterError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        // Borrow the face and the layout context separately.
        self.face_for(book, id)?;
        let Self { layout_ctx, faces } = self;
        let face = faces
            .get_mut(&id)
            .ok_or_else(|| PosterError::render("font face cache miss"))?;

        let mut builder = layout_ctx.ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        let mut ascent = 0.0f32;
        let mut descent = 0.0f32;
        let mut font_size = size;
        for (idx, line) in layout.lines().enumerate() {
            let metrics = line.metrics();
            if idx == 0 {
                ascent = metrics.ascent;
                descent = metrics.descent;
            }
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                font_size = run.run().font_size();
                glyphs.extend(run.positioned_glyphs().map(|g| ShapedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y - metrics.baseline,
                }));
            }
        }

        Ok(ShapedLine {
            width: f64::from(layout.width()),
            ascent: f64::from(ascent),
            descent: f64::from(descent),
            font_size,
            glyphs,
        })
    }

    /// Advance width of `text`; the measurement used for word wrapping.
    pub fn measure(
        &mut self,
        book: &FontBook,
        id: FaceId,
        text: &str,
        size_px: f64,
    ) -> PosterResult<f64> {
        Ok(self.shape_line(book, id, text, size_px)?.width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
