use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::scene::model::{PhotoTransform, PlaceholderRegion};

/// Where and how a photo is drawn inside its placeholder region.
///
/// `draw` is expressed in the local frame: origin at `pivot`, axes rotated by `rotation_rad`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoPlacement {
    /// Rotation pivot in canvas coordinates (the region center).
    pub pivot: Point,
    /// Scaled image rectangle in the rotated local frame.
    pub draw: Rect,
    /// Rotation about `pivot`, in radians.
    pub rotation_rad: f64,
    /// Uniform image scale.
    pub scale: f64,
}

impl PhotoPlacement {
    /// Transform from image pixel space to canvas space.
    ///
    /// Order: translate to pivot, rotate, move to the local draw origin, scale the image.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.pivot.to_vec2())
            * Affine::rotate(self.rotation_rad)
            * Affine::translate(Vec2::new(self.draw.x0, self.draw.y0))
            * Affine::scale(self.scale)
    }
}

/// Place an `img_w x img_h` photo centered on `region`, rotated about the region center, then
/// shifted by the transform offsets in the rotated frame.
pub fn centered_affine_placement(
    region: &PlaceholderRegion,
    transform: &PhotoTransform,
    img_w: f64,
    img_h: f64,
) -> PhotoPlacement {
    let scale = transform.scale();
    let draw_w = img_w * scale;
    let draw_h = img_h * scale;
    let x0 = -draw_w / 2.0 + transform.offset_x;
    let y0 = -draw_h / 2.0 + transform.offset_y;

    PhotoPlacement {
        pivot: region.center(),
        draw: Rect::new(x0, y0, x0 + draw_w, y0 + draw_h),
        rotation_rad: transform.rotation_deg.to_radians(),
        scale,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/placement.rs"]
mod tests;
