//! Boundary between free-form user input and the scene model.
//!
//! Raw field text is parsed leniently; anything that does not parse leaves the previous value.

use crate::assets::color::ColorDef;
use crate::foundation::error::{PosterError, PosterResult};
use crate::scene::model::{HorizontalAlign, PhotoTransform, PlaceholderRegion, TextLayer};

/// Parse the longest numeric prefix of `raw`, after leading whitespace.
///
/// `" 12.5px"` gives `12.5`, `"-3e2"` gives `-300`, `"abc"` and `""` give `None`.
pub fn parse_numeric_input(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return None;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Editable placeholder fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionField {
    /// Left edge.
    X,
    /// Top edge.
    Y,
    /// Width.
    Width,
    /// Height.
    Height,
}

/// Editable photo transform fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformField {
    /// Uniform scale.
    Scale,
    /// Horizontal offset.
    OffsetX,
    /// Vertical offset.
    OffsetY,
    /// Rotation in degrees.
    Rotation,
}

/// Numeric text layer fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    /// Font size in pixels.
    FontSize,
    /// Anchor x.
    X,
    /// Anchor y.
    Y,
    /// Line height multiplier.
    LineHeight,
}

fn replace(slot: &mut f64, v: f64) -> bool {
    let changed = slot.to_bits() != v.to_bits();
    *slot = v;
    changed
}

impl PlaceholderRegion {
    /// Apply raw field input. Returns `true` when the region changed.
    pub fn apply_edit(&mut self, field: RegionField, raw: &str) -> bool {
        let Some(v) = parse_numeric_input(raw) else {
            return false;
        };
        let before = *self;
        match field {
            RegionField::X => self.x = v,
            RegionField::Y => self.y = v,
            RegionField::Width => self.set_width(v),
            RegionField::Height => self.set_height(v),
        }
        *self != before
    }
}

impl PhotoTransform {
    /// Apply raw field input. Returns `true` when the transform changed.
    pub fn apply_edit(&mut self, field: TransformField, raw: &str) -> bool {
        let Some(v) = parse_numeric_input(raw) else {
            return false;
        };
        match field {
            TransformField::Scale => {
                let before = self.scale();
                self.set_scale(v);
                self.scale() != before
            }
            TransformField::OffsetX => replace(&mut self.offset_x, v),
            TransformField::OffsetY => replace(&mut self.offset_y, v),
            TransformField::Rotation => replace(&mut self.rotation_deg, v),
        }
    }
}

impl TextLayer {
    /// Apply raw numeric field input. Returns `true` when the layer changed.
    pub fn apply_edit(&mut self, field: TextField, raw: &str) -> bool {
        let Some(v) = parse_numeric_input(raw) else {
            return false;
        };
        match field {
            TextField::FontSize => {
                let before = self.font_size_px();
                self.set_font_size_px(v);
                self.font_size_px() != before
            }
            TextField::X => replace(&mut self.anchor.x, v),
            TextField::Y => replace(&mut self.anchor.y, v),
            TextField::LineHeight => replace(&mut self.line_height, v),
        }
    }

    /// Set the fill color from CSS text; invalid input leaves the color unchanged.
    pub fn set_color_css(&mut self, raw: &str) -> PosterResult<()> {
        self.color = ColorDef::parse(raw)?;
        Ok(())
    }
}

impl std::str::FromStr for HorizontalAlign {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" | "end" => Ok(Self::Right),
            other => Err(PosterError::validation(format!(
                "unknown text alignment '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/edit.rs"]
mod tests;
