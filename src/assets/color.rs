use crate::foundation::core::Rgba8;
use crate::foundation::error::{PosterError, PosterResult};
use serde::{Deserialize, Serialize};

/// Color in normalized straight-alpha sRGB components (`0..=1`).
///
/// Deserializes from a CSS color string (`"#fff"`, `"#ffffff"`, `"#ffffffb3"`,
/// `"rgb(255, 255, 255)"`, `"rgba(255,255,255,0.7)"`, a few named colors), an `{r, g, b, a}`
/// object or an `[r, g, b(, a)]` array. Serializes as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDef {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl ColorDef {
    /// Build from normalized components.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels and a normalized alpha, like CSS `rgba()`.
    pub fn rgba8(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            a,
        )
    }

    /// Opaque white.
    pub fn white() -> Self {
        Self::rgba(1.0, 1.0, 1.0, 1.0)
    }

    /// Parse a CSS color string.
    pub fn parse(s: &str) -> PosterResult<Self> {
        parse_css(s).map_err(PosterError::validation)
    }

    /// Quantize to straight RGBA8.
    pub fn to_rgba8(self) -> Rgba8 {
        Rgba8 {
            r: unit_to_u8(self.r),
            g: unit_to_u8(self.g),
            b: unit_to_u8(self.b),
            a: unit_to_u8(self.a),
        }
    }
}

fn unit_to_u8(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let c = self.to_rgba8();
        let hex = if c.a == 255 {
            format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        };
        serializer.serialize_str(&hex)
    }
}

impl std::str::FromStr for ColorDef {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => parse_css(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::rgba(v[0], v[1], v[2], 1.0))
                } else if v.len() == 4 {
                    Ok(Self::rgba(v[0], v[1], v[2], v[3]))
                } else {
                    Err(serde::de::Error::custom(
                        "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    ))
                }
            }
        }
    }
}

fn parse_css(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
    {
        return parse_rgb_fn(args);
    }

    match lower.as_str() {
        "white" => Ok(ColorDef::rgba(1.0, 1.0, 1.0, 1.0)),
        "black" => Ok(ColorDef::rgba(0.0, 0.0, 0.0, 1.0)),
        "transparent" => Ok(ColorDef::rgba(0.0, 0.0, 0.0, 0.0)),
        "red" => Ok(ColorDef::rgba(1.0, 0.0, 0.0, 1.0)),
        "orange" => Ok(ColorDef::rgba8(255, 165, 0, 1.0)),
        _ => parse_hex(s).map_err(|_| format!("unsupported color \"{s}\"")),
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    fn hex_nibble(c: &str) -> Result<u8, String> {
        let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
        Ok(v * 17)
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }

    let (r, g, b, a) = match s.len() {
        3 => (hex_nibble(&s[0..1])?, hex_nibble(&s[1..2])?, hex_nibble(&s[2..3])?, 255),
        4 => (
            hex_nibble(&s[0..1])?,
            hex_nibble(&s[1..2])?,
            hex_nibble(&s[2..3])?,
            hex_nibble(&s[3..4])?,
        ),
        6 => (hex_byte(&s[0..2])?, hex_byte(&s[2..4])?, hex_byte(&s[4..6])?, 255),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err(
                "hex color must be #RGB, #RGBA, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned(),
            );
        }
    };

    Ok(ColorDef::rgba8(r, g, b, f64::from(a) / 255.0))
}

fn parse_rgb_fn(args: &str) -> Result<ColorDef, String> {
    let inner = args
        .strip_suffix(')')
        .ok_or_else(|| "rgb()/rgba() is missing a closing parenthesis".to_owned())?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err("rgb()/rgba() takes 3 or 4 arguments".to_owned());
    }

    let channel = |p: &str| -> Result<f64, String> {
        let v: f64 = p
            .parse()
            .map_err(|_| format!("invalid color channel \"{p}\""))?;
        Ok(v.clamp(0.0, 255.0) / 255.0)
    };
    let alpha = match parts.get(3) {
        Some(p) => {
            let v: f64 = p.parse().map_err(|_| format!("invalid alpha \"{p}\""))?;
            v.clamp(0.0, 1.0)
        }
        None => 1.0,
    };

    Ok(ColorDef::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
