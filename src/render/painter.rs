use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::{PosterError, PosterResult};
use crate::text::shaper::ShapedGlyph;

/// Immediate-mode drawing over a `vello_cpu` context with explicit save/restore.
///
/// The painter tracks the current transform and the number of clip layers it pushed, so a
/// [`Painter::scoped`] block can put both back no matter how the block exits.
pub(crate) struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    transform: Affine,
    clip_depth: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SavedState {
    transform: Affine,
    clip_depth: usize,
}

impl Painter {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.reset();
        Self {
            ctx,
            width,
            height,
            transform: Affine::IDENTITY,
            clip_depth: 0,
        }
    }

    pub(crate) fn width(&self) -> f64 {
        f64::from(self.width)
    }

    pub(crate) fn height(&self) -> f64 {
        f64::from(self.height)
    }

    pub(crate) fn transform(&self) -> Affine {
        self.transform
    }

    pub(crate) fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    pub(crate) fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.ctx.set_transform(affine_to_cpu(transform));
    }

    /// Post-multiply the current transform (`current * local`).
    pub(crate) fn concat(&mut self, local: Affine) {
        self.set_transform(self.transform * local);
    }

    /// Intersect the clip with `rect` under the current transform.
    pub(crate) fn push_clip_rect(&mut self, rect: Rect) {
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to((rect.x0, rect.y0));
        path.line_to((rect.x1, rect.y0));
        path.line_to((rect.x1, rect.y1));
        path.line_to((rect.x0, rect.y1));
        path.close_path();
        self.ctx.push_clip_layer(&path);
        self.clip_depth += 1;
    }

    pub(crate) fn pop_clip(&mut self) {
        if self.clip_depth > 0 {
            self.ctx.pop_layer();
            self.clip_depth -= 1;
        }
    }

    fn save(&self) -> SavedState {
        SavedState {
            transform: self.transform,
            clip_depth: self.clip_depth,
        }
    }

    fn restore(&mut self, saved: SavedState) {
        while self.clip_depth > saved.clip_depth {
            self.pop_clip();
        }
        self.set_transform(saved.transform);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::default());
    }

    /// Run `f` and restore transform, clip and stroke state afterwards, also on error.
    pub(crate) fn scoped<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> PosterResult<R>,
    ) -> PosterResult<R> {
        let saved = self.save();
        let out = f(self);
        self.restore(saved);
        out
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_paint(cpu_color(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    pub(crate) fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8) {
        self.ctx.set_paint(cpu_color(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }

    pub(crate) fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8) {
        self.ctx.set_paint(cpu_color(color));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    /// Fill the `w x h` image rectangle with `paint` under the current transform.
    pub(crate) fn draw_image(&mut self, paint: vello_cpu::Image, w: u32, h: u32) {
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
    }

    /// Draw shaped glyphs with the line start and baseline at `origin`.
    pub(crate) fn draw_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        font_size: f32,
        glyphs: &[ShapedGlyph],
        origin: Point,
        color: Rgba8,
    ) {
        if glyphs.is_empty() {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(
            self.transform * Affine::translate(origin.to_vec2()),
        ));
        self.ctx.set_paint(cpu_color(color));
        self.ctx
            .glyph_run(font)
            .font_size(font_size)
            .fill_glyphs(glyphs.iter().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            }));
        self.ctx.set_transform(affine_to_cpu(self.transform));
    }

    /// Rasterize everything drawn so far into premultiplied RGBA8 bytes.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        while self.clip_depth > 0 {
            self.pop_clip();
        }
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap.data_as_u8_slice().to_vec()
    }
}

pub(crate) fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to((p.x, p.y)),
            PathEl::LineTo(p) => out.line_to((p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to((p1.x, p1.y), (p2.x, p2.y)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to((p1.x, p1.y), (p2.x, p2.y), (p3.x, p3.y)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Wrap premultiplied RGBA8 bytes as an image paint.
pub(crate) fn image_paint_from_premul(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PosterResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PosterError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PosterError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PosterError::render("image byte length does not match its size"));
    }

    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);

    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
