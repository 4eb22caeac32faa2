use crate::foundation::core::{Affine, Rect, Vec2};

/// Result of fitting an image over a target rectangle with "cover" semantics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Uniform scale applied to the source image.
    pub scale: f64,
    /// Left edge of the scaled image in target coordinates.
    pub draw_x: f64,
    /// Top edge of the scaled image in target coordinates.
    pub draw_y: f64,
    /// Scaled image width.
    pub draw_w: f64,
    /// Scaled image height.
    pub draw_h: f64,
}

impl CoverFit {
    /// Destination rectangle of the scaled image.
    pub fn draw_rect(&self) -> Rect {
        Rect::new(
            self.draw_x,
            self.draw_y,
            self.draw_x + self.draw_w,
            self.draw_y + self.draw_h,
        )
    }

    /// Transform from image pixel space to target space.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.draw_x, self.draw_y)) * Affine::scale(self.scale)
    }
}

/// Scale `img_w x img_h` so it fully covers `canvas_w x canvas_h`, centered, overflow cropped.
///
/// Returns `None` when any dimension is non-positive or non-finite.
pub fn cover_fit(canvas_w: f64, canvas_h: f64, img_w: f64, img_h: f64) -> Option<CoverFit> {
    let dims = [canvas_w, canvas_h, img_w, img_h];
    if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
        return None;
    }

    let scale = (canvas_w / img_w).max(canvas_h / img_h);
    let draw_w = img_w * scale;
    let draw_h = img_h * scale;
    Some(CoverFit {
        scale,
        draw_x: (canvas_w - draw_w) / 2.0,
        draw_y: (canvas_h - draw_h) / 2.0,
        draw_w,
        draw_h,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
