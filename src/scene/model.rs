use crate::assets::color::ColorDef;
use crate::foundation::core::{Canvas, Point, Rect, Vec2};
use crate::foundation::error::{PosterError, PosterResult};
use crate::text::font::{FontDescriptor, FontWeight};
use serde::{Deserialize, Deserializer, Serialize};

/// Replacement for a non-positive placeholder width or height.
pub const MIN_REGION_EXTENT: f64 = 10.0;
/// Replacement for a non-positive photo scale.
pub const MIN_PHOTO_SCALE: f64 = 0.05;
/// Replacement for a non-positive font size, in pixels.
pub const MIN_FONT_SIZE_PX: f64 = 10.0;
/// Line height multiplier used when none (or a non-positive one) is given.
pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;
/// Caption drawn inside an empty placeholder.
pub const DEFAULT_PLACEHOLDER_CAPTION: &str = "User photo here";

/// Replace a non-positive or non-finite value with `floor`; positive values pass through.
pub(crate) fn clamp_floor(v: f64, floor: f64) -> f64 {
    if !v.is_finite() || v <= 0.0 { floor } else { v }
}

fn de_region_extent<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(clamp_floor(f64::deserialize(d)?, MIN_REGION_EXTENT))
}

fn de_photo_scale<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(clamp_floor(f64::deserialize(d)?, MIN_PHOTO_SCALE))
}

fn de_font_size<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(clamp_floor(f64::deserialize(d)?, MIN_FONT_SIZE_PX))
}

/// Composable poster description: a canvas and an ordered layer stack.
///
/// Layer order is fixed: background, then the optional photo, then texts in list order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Output canvas.
    pub canvas: Canvas,
    /// Bottom layer; always present.
    #[serde(default)]
    pub background: BackgroundLayer,
    /// Clipped user photo slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoLayer>,
    /// Text layers, painted after the photo in list order.
    #[serde(default)]
    pub texts: Vec<TextLayer>,
}

/// Borrowed view of one layer, in paint order.
#[derive(Clone, Copy, Debug)]
pub enum LayerRef<'a> {
    /// Background layer.
    Background(&'a BackgroundLayer),
    /// Photo layer.
    Photo(&'a PhotoLayer),
    /// Text layer with its index in [`Scene::texts`].
    Text(usize, &'a TextLayer),
}

impl Scene {
    /// Empty scene with the default background.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            background: BackgroundLayer::default(),
            photo: None,
            texts: Vec::new(),
        }
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = LayerRef<'_>> + '_ {
        std::iter::once(LayerRef::Background(&self.background))
            .chain(self.photo.iter().map(LayerRef::Photo))
            .chain(
                self.texts
                    .iter()
                    .enumerate()
                    .map(|(idx, t)| LayerRef::Text(idx, t)),
            )
    }

    /// Check structural constraints that serde alone cannot express.
    pub fn validate(&self) -> PosterResult<()> {
        self.canvas.validate()?;
        for (idx, t) in self.texts.iter().enumerate() {
            if t.font_family.trim().is_empty() {
                return Err(PosterError::validation(format!(
                    "text layer {idx} has an empty font family"
                )));
            }
            if !t.anchor.x.is_finite() || !t.anchor.y.is_finite() {
                return Err(PosterError::validation(format!(
                    "text layer {idx} anchor must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a scene from JSON.
    pub fn from_json_str(s: &str) -> PosterResult<Self> {
        let scene: Self = serde_json::from_str(s).map_err(|e| {
            PosterError::serde(format!("parse scene JSON at line {}: {e}", e.line()))
        })?;
        scene.validate()?;
        Ok(scene)
    }

    /// Parse and validate a scene from a JSON reader.
    pub fn from_reader(r: impl std::io::Read) -> PosterResult<Self> {
        let scene: Self = serde_json::from_reader(r)
            .map_err(|e| PosterError::serde(format!("parse scene JSON: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Parse and validate a scene from a JSON file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .map_err(|e| PosterError::validation(format!("open scene '{}': {e}", path.display())))?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// Pretty JSON form.
    pub fn to_json_pretty(&self) -> PosterResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PosterError::serde(format!("serialize scene JSON: {e}")))
    }
}

/// Background layer: an optional cover-fitted image over a procedural fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackgroundLayer {
    /// Image store key; when it resolves, the image covers the canvas and the fill is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Fill drawn when no image resolves.
    #[serde(default)]
    pub fill: BackgroundFill,
}

impl Default for BackgroundLayer {
    fn default() -> Self {
        Self {
            image: None,
            fill: BackgroundFill::default(),
        }
    }
}

/// Procedural background fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackgroundFill {
    /// Vertical linear gradient from the top edge to the bottom edge.
    Gradient {
        /// Color of the first row.
        top: ColorDef,
        /// Color of the last row.
        bottom: ColorDef,
    },
    /// Flat color plus decorative glyphs.
    Solid {
        /// Fill color.
        color: ColorDef,
        /// Decorative glyphs painted over the fill.
        #[serde(default)]
        ornaments: Vec<Ornament>,
    },
}

impl Default for BackgroundFill {
    fn default() -> Self {
        Self::Gradient {
            top: ColorDef::rgba8(0x0f, 0x17, 0x2a, 1.0),
            bottom: ColorDef::rgba8(0x1f, 0x29, 0x37, 1.0),
        }
    }
}

fn default_ornament_family() -> String {
    "Inter".to_owned()
}

/// A single decorative glyph, centered on `(x, y)` and rotated about that point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ornament {
    /// Text to draw, usually one character.
    pub glyph: String,
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Font size in pixels.
    pub size_px: f64,
    /// Fill color.
    pub color: ColorDef,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotation_deg: f64,
    /// Font family.
    #[serde(default = "default_ornament_family")]
    pub font_family: String,
}

/// Rectangle on the canvas where the user photo is clipped.
///
/// Width and height stay positive: non-positive values become [`MIN_REGION_EXTENT`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    #[serde(deserialize_with = "de_region_extent")]
    width: f64,
    #[serde(deserialize_with = "de_region_extent")]
    height: f64,
}

impl PlaceholderRegion {
    /// Build a region; non-positive extents become [`MIN_REGION_EXTENT`].
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: clamp_floor(width, MIN_REGION_EXTENT),
            height: clamp_floor(height, MIN_REGION_EXTENT),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Set the width; non-positive values become [`MIN_REGION_EXTENT`].
    pub fn set_width(&mut self, width: f64) {
        self.width = clamp_floor(width, MIN_REGION_EXTENT);
    }

    /// Set the height; non-positive values become [`MIN_REGION_EXTENT`].
    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_floor(height, MIN_REGION_EXTENT);
    }

    /// Region as a canvas rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Region center.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// User adjustments applied to the photo inside its region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoTransform {
    #[serde(default = "one", deserialize_with = "de_photo_scale")]
    scale: f64,
    /// Shift along the rotated x axis, in pixels.
    #[serde(default)]
    pub offset_x: f64,
    /// Shift along the rotated y axis, in pixels.
    #[serde(default)]
    pub offset_y: f64,
    /// Clockwise rotation about the region center, in degrees.
    #[serde(default)]
    pub rotation_deg: f64,
}

fn one() -> f64 {
    1.0
}

impl Default for PhotoTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            rotation_deg: 0.0,
        }
    }
}

impl PhotoTransform {
    /// Uniform scale, always positive.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the scale; non-positive values become [`MIN_PHOTO_SCALE`].
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_floor(scale, MIN_PHOTO_SCALE);
    }
}

fn default_caption() -> String {
    DEFAULT_PLACEHOLDER_CAPTION.to_owned()
}

/// Clipped photo slot. Without a resolvable image it draws a dashed placeholder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoLayer {
    /// Image store key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Clip region.
    pub region: PlaceholderRegion,
    /// Scale, offsets and rotation.
    #[serde(default)]
    pub transform: PhotoTransform,
    /// Placeholder caption.
    #[serde(default = "default_caption")]
    pub caption: String,
}

impl PhotoLayer {
    /// Empty slot over `region` with the identity transform.
    pub fn new(region: PlaceholderRegion) -> Self {
        Self {
            image: None,
            region,
            transform: PhotoTransform::default(),
            caption: default_caption(),
        }
    }
}

/// Horizontal alignment of each line relative to the text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    /// Line starts at the anchor.
    #[default]
    Left,
    /// Line is centered on the anchor.
    Center,
    /// Line ends at the anchor.
    Right,
}

/// Vertical meaning of the text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    /// Anchor `y` is the first line's alphabetic baseline.
    #[default]
    Alphabetic,
    /// Anchor `y` is the vertical middle of each line box.
    Middle,
}

fn default_line_height() -> f64 {
    DEFAULT_LINE_HEIGHT
}

/// Multiline text layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    /// Text; `'\n'` separates paragraphs.
    pub content: String,
    /// Font family name.
    pub font_family: String,
    #[serde(deserialize_with = "de_font_size")]
    font_size_px: f64,
    /// Fill color.
    pub color: ColorDef,
    /// Bold face.
    #[serde(default)]
    pub bold: bool,
    /// Italic face.
    #[serde(default)]
    pub italic: bool,
    /// Numeric weight (`100..=900`); overrides `bold` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: HorizontalAlign,
    /// Vertical anchor meaning.
    #[serde(default)]
    pub baseline: TextBaseline,
    /// Anchor point.
    pub anchor: Vec2,
    /// Line height as a multiple of the font size.
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    /// Absolute line spacing in pixels; overrides `line_height`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height_px: Option<f64>,
    /// Word-wrap width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width_px: Option<f64>,
}

impl TextLayer {
    /// Left-aligned white text at `anchor` with the default line height.
    pub fn new(
        content: impl Into<String>,
        font_family: impl Into<String>,
        font_size_px: f64,
        anchor: Vec2,
    ) -> Self {
        Self {
            content: content.into(),
            font_family: font_family.into(),
            font_size_px: clamp_floor(font_size_px, MIN_FONT_SIZE_PX),
            color: ColorDef::white(),
            bold: false,
            italic: false,
            weight: None,
            align: HorizontalAlign::Left,
            baseline: TextBaseline::Alphabetic,
            anchor,
            line_height: DEFAULT_LINE_HEIGHT,
            line_height_px: None,
            max_width_px: None,
        }
    }

    /// Font size in pixels, always positive.
    pub fn font_size_px(&self) -> f64 {
        self.font_size_px
    }

    /// Set the font size; non-positive values become [`MIN_FONT_SIZE_PX`].
    pub fn set_font_size_px(&mut self, size: f64) {
        self.font_size_px = clamp_floor(size, MIN_FONT_SIZE_PX);
    }

    /// Distance between consecutive baselines.
    pub fn line_spacing_px(&self) -> f64 {
        if let Some(px) = self.line_height_px.filter(|v| v.is_finite() && *v > 0.0) {
            return px;
        }
        let mult = if self.line_height.is_finite() && self.line_height > 0.0 {
            self.line_height
        } else {
            DEFAULT_LINE_HEIGHT
        };
        self.font_size_px * mult
    }

    /// `true` when there is nothing visible to draw.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Font request for this layer.
    pub fn font_descriptor(&self) -> FontDescriptor {
        let weight = match self.weight {
            Some(w) => FontWeight::new(w),
            None if self.bold => FontWeight::BOLD,
            None => FontWeight::NORMAL,
        };
        FontDescriptor {
            family: self.font_family.clone(),
            size_px: self.font_size_px,
            weight,
            italic: self.italic,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
