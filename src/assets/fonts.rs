use std::sync::Arc;

use crate::foundation::error::{PosterError, PosterResult};
use crate::text::font::{FontDescriptor, FontWeight};

/// Weight and slant of one registered face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FaceStyle {
    /// Numeric weight.
    pub weight: FontWeight,
    /// Italic face.
    pub italic: bool,
}

impl FaceStyle {
    /// Face of `weight`, italic when `italic` is set.
    pub fn new(weight: FontWeight, italic: bool) -> Self {
        Self { weight, italic }
    }

    /// Upright regular face.
    pub fn regular() -> Self {
        Self::default()
    }

    /// Upright bold face.
    pub fn bold() -> Self {
        Self::new(FontWeight::BOLD, false)
    }
}

/// Stable handle of a registered face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(usize);

#[derive(Clone, Debug)]
pub(crate) struct FontFace {
    pub(crate) family: String,
    pub(crate) style: FaceStyle,
    pub(crate) bytes: Arc<Vec<u8>>,
}

/// Font faces supplied by the caller, keyed by family name and style.
///
/// Registration is append-only: a later face with the same family and style wins lookups, and
/// [`FaceId`]s stay valid for the lifetime of the book.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    faces: Vec<FontFace>,
    fallback: Option<String>,
}

impl FontBook {
    /// Empty book without a fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a face. Fails when `bytes` contain no usable font.
    pub fn register(
        &mut self,
        family: impl Into<String>,
        style: FaceStyle,
        bytes: Vec<u8>,
    ) -> PosterResult<FaceId> {
        let family = family.into();
        if family.trim().is_empty() {
            return Err(PosterError::validation("font family must be non-empty"));
        }

        let mut probe = parley::FontContext::default();
        let found = probe
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        if found.is_empty() {
            return Err(PosterError::decode(format!(
                "no usable font face in data registered for family '{family}'"
            )));
        }

        let id = FaceId(self.faces.len());
        tracing::debug!(family = %family, weight = style.weight.value(), italic = style.italic, "registered font face");
        self.faces.push(FontFace {
            family,
            style,
            bytes: Arc::new(bytes),
        });
        Ok(id)
    }

    /// Family tried after the descriptor's own stack.
    pub fn set_fallback(&mut self, family: impl Into<String>) {
        self.fallback = Some(family.into());
    }

    /// Configured fallback family.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    /// Number of registered faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// `true` when no face is registered.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// `true` when some face is registered under `family` (ASCII case-insensitive).
    pub fn has_family(&self, family: &str) -> bool {
        self.faces
            .iter()
            .any(|f| f.family.eq_ignore_ascii_case(family))
    }

    pub(crate) fn face(&self, id: FaceId) -> Option<&FontFace> {
        self.faces.get(id.0)
    }

    /// Pick a face for `desc`.
    ///
    /// Families are tried in stack order, then the fallback family. Within a family the face
    /// with the matching slant and the closest weight wins.
    pub fn resolve(&self, desc: &FontDescriptor) -> Option<FaceId> {
        let wanted = FaceStyle::new(desc.weight, desc.italic);
        let fallback = self.fallback.as_deref();

        desc.stack()
            .into_iter()
            .chain(fallback)
            .find_map(|family| self.best_in_family(family, wanted))
    }

    fn best_in_family(&self, family: &str, wanted: FaceStyle) -> Option<FaceId> {
        self.faces
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, f)| f.family.eq_ignore_ascii_case(family))
            .min_by_key(|(_, f)| {
                let slant = if f.style.italic == wanted.italic { 0 } else { 1 };
                (slant, f.style.weight.distance(wanted.weight))
            })
            .map(|(idx, _)| FaceId(idx))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
