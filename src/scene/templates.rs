//! Built-in poster layouts, expressed as plain [`Scene`] values.

use crate::assets::color::ColorDef;
use crate::foundation::core::{Canvas, Vec2};
use crate::foundation::error::{PosterError, PosterResult};
use crate::scene::model::{
    BackgroundFill, BackgroundLayer, HorizontalAlign, Ornament, PhotoLayer, PlaceholderRegion,
    Scene, TextBaseline, TextLayer,
};

/// Store key the templates use for the background image.
pub const BACKGROUND_IMAGE_KEY: &str = "background";
/// Store key the templates use for the user photo.
pub const PHOTO_IMAGE_KEY: &str = "photo";

const WOTD_FAMILY: &str = "Inter";
const WOTD_BLUE: (u8, u8, u8) = (0x15, 0x50, 0xB3);
const WOTD_BLUE_LIGHT: (u8, u8, u8) = (0x1F, 0x6B, 0xD4);
const WOTD_ORANGE: (u8, u8, u8) = (0xF2, 0x6A, 0x21);
const WOTD_WHITE: (u8, u8, u8) = (0xFF, 0xFF, 0xFF);
const WOTD_DARK: (u8, u8, u8) = (0x33, 0x33, 0x33);

/// Word-of-the-Day text used when the caller supplies none.
pub const DEFAULT_WORD: &str = "Curious";
/// Default meaning.
pub const DEFAULT_MEANING: &str = "Wanting to know or learn something.";
/// Default example sentence.
pub const DEFAULT_EXAMPLE: &str = "The curious cat looked inside the box.";

// (glyph, x, y, size, color, rotation)
const BG_LETTERS: [(&str, f64, f64, f64, (u8, u8, u8), f64); 9] = [
    ("s", 80.0, 160.0, 160.0, WOTD_WHITE, -20.0),
    ("c", 160.0, 420.0, 250.0, WOTD_ORANGE, -10.0),
    ("e", 80.0, 900.0, 140.0, WOTD_ORANGE, 15.0),
    ("p", 990.0, 480.0, 180.0, WOTD_WHITE, 20.0),
    ("u", 900.0, 160.0, 170.0, WOTD_ORANGE, 25.0),
    ("s", 920.0, 880.0, 140.0, WOTD_BLUE_LIGHT, -30.0),
    ("e", 140.0, 1380.0, 160.0, WOTD_WHITE, -10.0),
    ("p", 980.0, 1420.0, 180.0, WOTD_ORANGE, 12.0),
    ("s", 540.0, 1820.0, 160.0, WOTD_WHITE, 0.0),
];

fn rgb((r, g, b): (u8, u8, u8)) -> ColorDef {
    ColorDef::rgba8(r, g, b, 1.0)
}

fn canvas(width: u32, height: u32) -> Canvas {
    // Both templates use fixed in-range sizes.
    Canvas { width, height }
}

/// Named built-in templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    /// 800x1200 campaign poster with a photo slot and a two-line title.
    Campaign,
    /// 1080x1350 Word-of-the-Day card.
    WordOfTheDay,
}

impl TemplateKind {
    /// Build the template with its default content.
    pub fn scene(self) -> Scene {
        match self {
            Self::Campaign => campaign_poster(),
            Self::WordOfTheDay => word_of_the_day(DEFAULT_WORD, DEFAULT_MEANING, DEFAULT_EXAMPLE),
        }
    }

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::WordOfTheDay => "word-of-the-day",
        }
    }
}

impl std::str::FromStr for TemplateKind {
    type Err = PosterError;

    fn from_str(s: &str) -> PosterResult<Self> {
        match s.trim() {
            "campaign" => Ok(Self::Campaign),
            "word-of-the-day" | "wotd" => Ok(Self::WordOfTheDay),
            other => Err(PosterError::validation(format!("unknown template '{other}'"))),
        }
    }
}

/// The campaign poster: gradient background, a 400x400 photo slot and a centered bold title.
#[tracing::instrument(level = "debug")]
pub fn campaign_poster() -> Scene {
    let mut title = TextLayer::new(
        "Your Poster Title\nYour Tagline Here",
        "Poppins",
        48.0,
        Vec2::new(400.0, 150.0),
    );
    title.color = ColorDef::white();
    title.bold = true;
    title.align = HorizontalAlign::Center;

    let mut photo = PhotoLayer::new(PlaceholderRegion::new(200.0, 300.0, 400.0, 400.0));
    photo.image = Some(PHOTO_IMAGE_KEY.to_owned());

    Scene {
        canvas: canvas(800, 1200),
        background: BackgroundLayer {
            image: Some(BACKGROUND_IMAGE_KEY.to_owned()),
            fill: BackgroundFill::default(),
        },
        photo: Some(photo),
        texts: vec![title],
    }
}

fn wotd_text(content: &str, y: f64, weight: u16, size_px: f64, color: ColorDef) -> TextLayer {
    let mut t = TextLayer::new(content, WOTD_FAMILY, size_px, Vec2::new(540.0, y));
    t.weight = Some(weight);
    t.bold = weight >= 700;
    t.color = color;
    t.align = HorizontalAlign::Center;
    t.baseline = TextBaseline::Middle;
    t
}

/// The Word-of-the-Day card: letter ornaments on royal blue, a large word and wrapped
/// meaning/example blocks.
#[tracing::instrument(level = "debug")]
pub fn word_of_the_day(word: &str, meaning: &str, example: &str) -> Scene {
    let card_y = 210.0;
    let dark = rgb(WOTD_DARK);

    let ornaments = BG_LETTERS
        .iter()
        .map(|&(glyph, x, y, size_px, color, rotation_deg)| Ornament {
            glyph: glyph.to_owned(),
            x,
            y,
            size_px,
            color: rgb(color),
            rotation_deg,
            font_family: WOTD_FAMILY.to_owned(),
        })
        .collect();

    let mut meaning_text = wotd_text(meaning, card_y + 580.0, 700, 40.0, dark);
    meaning_text.max_width_px = Some(600.0);
    meaning_text.line_height_px = Some(40.0);

    let mut example_text = wotd_text(example, card_y + 750.0, 600, 38.0, dark);
    example_text.max_width_px = Some(700.0);
    example_text.line_height_px = Some(25.0);

    Scene {
        canvas: canvas(1080, 1350),
        background: BackgroundLayer {
            image: Some(BACKGROUND_IMAGE_KEY.to_owned()),
            fill: BackgroundFill::Solid {
                color: rgb(WOTD_BLUE),
                ornaments,
            },
        },
        photo: None,
        texts: vec![
            wotd_text(word, card_y + 450.0, 800, 120.0, rgb(WOTD_ORANGE)),
            wotd_text("Meaning:", card_y + 530.0, 500, 40.0, dark),
            meaning_text,
            wotd_text("Example:", card_y + 700.0, 500, 40.0, dark),
            example_text,
        ],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/templates.rs"]
mod tests;
