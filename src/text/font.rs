use serde::{Deserialize, Serialize};

/// Generic families appended after the requested family, in lookup order.
pub const GENERIC_FALLBACK_STACK: [&str; 5] = [
    "system-ui",
    "-apple-system",
    "BlinkMacSystemFont",
    "Segoe UI",
    "sans-serif",
];

/// CSS-style numeric font weight in `1..=1000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontWeight(u16);

impl FontWeight {
    /// Regular weight (400).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (700).
    pub const BOLD: Self = Self(700);

    /// Clamp into the CSS range.
    pub fn new(weight: u16) -> Self {
        Self(weight.clamp(1, 1000))
    }

    /// Numeric value.
    pub fn value(self) -> u16 {
        self.0
    }

    /// Distance used to pick the closest registered face.
    pub(crate) fn distance(self, other: Self) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// What a text layer asks for: family, size and style.
#[derive(Clone, Debug, PartialEq)]
pub struct FontDescriptor {
    /// Requested family name.
    pub family: String,
    /// Size in pixels.
    pub size_px: f64,
    /// Numeric weight.
    pub weight: FontWeight,
    /// Italic style.
    pub italic: bool,
}

impl FontDescriptor {
    /// Regular, upright descriptor.
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
            weight: FontWeight::NORMAL,
            italic: false,
        }
    }

    /// Families to try, most specific first.
    pub fn stack(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(1 + GENERIC_FALLBACK_STACK.len());
        out.push(self.family.as_str());
        for generic in GENERIC_FALLBACK_STACK {
            if !generic.eq_ignore_ascii_case(&self.family) {
                out.push(generic);
            }
        }
        out
    }

    /// CSS `font` shorthand, e.g. `italic bold 48px Poppins, system-ui, ..., sans-serif`.
    pub fn css(&self) -> String {
        let mut out = String::new();
        if self.italic {
            out.push_str("italic ");
        }
        match self.weight {
            FontWeight::NORMAL => {}
            FontWeight::BOLD => out.push_str("bold "),
            w => {
                out.push_str(&w.value().to_string());
                out.push(' ');
            }
        }
        out.push_str(&format!("{}px ", self.size_px));

        let families: Vec<String> = self.stack().into_iter().map(css_family).collect();
        out.push_str(&families.join(", "));
        out
    }
}

fn css_family(name: &str) -> String {
    if name.contains(' ') {
        format!("\"{name}\"")
    } else {
        name.to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
