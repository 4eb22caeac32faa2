use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas.
    ///
    /// Both dimensions must be in `1..=65535`, the range supported by the raster backend.
    pub fn new(width: u32, height: u32) -> PosterResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Check the dimension limits without constructing a new value.
    pub fn validate(self) -> PosterResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PosterError::validation("canvas width and height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(PosterError::validation(format!(
                "canvas {}x{} exceeds the {}px raster limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Full canvas rectangle in canvas coordinates.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    pub(crate) fn size_u16(self) -> PosterResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| PosterError::validation("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| PosterError::validation("canvas height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(PosterError::validation("canvas width and height must be > 0"));
        }
        Ok((w, h))
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Linear interpolation per channel, rounding to nearest.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let af = f64::from(a);
            let bf = f64::from(b);
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
