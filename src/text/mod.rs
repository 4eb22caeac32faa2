//! Text measurement and line layout.
//!
//! Wrapping and vertical placement are pure functions over a measurement callback; the Parley
//! shaper supplies real measurements and glyphs at render time.

pub(crate) mod font;
pub(crate) mod shaper;
pub(crate) mod wrap;
