use super::*;
use crate::assets::fonts::FaceStyle;
use crate::test_support::local_font_bytes;

fn book_with_local_font() -> Option<(FontBook, FaceId)> {
    let bytes = local_font_bytes()?;
    let mut book = FontBook::new();
    let id = book.register("Test", FaceStyle::regular(), bytes).ok()?;
    Some((book, id))
}

#[test]
fn unknown_face_is_a_render_error_if_present() {
    let book = FontBook::new();
    let mut shaper = TextShaper::new();
    let Some((_, id)) = book_with_local_font() else {
        return;
    };
    let err = shaper.shape_line(&book, id, "hello", 20.0).unwrap_err();
    assert!(matches!(err, PosterError::Render(_)));
}

#[test]
fn shaping_reports_metrics_if_present() {
    let Some((book, id)) = book_with_local_font() else {
        return;
    };
    let mut shaper = TextShaper::new();

    let line = shaper.shape_line(&book, id, "Hello", 48.0).unwrap();
    assert!(line.width > 0.0);
    assert!(line.ascent > 0.0);
    assert!(line.descent >= 0.0);
    assert!(!line.glyphs.is_empty() && line.glyphs.len() <= 5);
    assert!(line.glyphs.iter().all(|g| g.y.abs() < 1e-3));
    assert!(line.glyphs.windows(2).all(|w| w[0].x < w[1].x));
}

#[test]
fn measurement_is_monotonic_and_deterministic_if_present() {
    let Some((book, id)) = book_with_local_font() else {
        return;
    };
    let mut shaper = TextShaper::new();

    let short = shaper.measure(&book, id, "cat", 40.0).unwrap();
    let long = shaper.measure(&book, id, "cat looked", 40.0).unwrap();
    let again = shaper.measure(&book, id, "cat looked", 40.0).unwrap();
    let bigger = shaper.measure(&book, id, "cat looked", 80.0).unwrap();
    assert!(long > short);
    assert_eq!(long, again);
    let ratio = bigger / long;
    assert!((1.9..=2.1).contains(&ratio), "ratio = {ratio}");
    assert_eq!(shaper.measure(&book, id, "", 40.0).unwrap(), 0.0);
}

#[test]
fn rejects_non_positive_size_if_present() {
    let Some((book, id)) = book_with_local_font() else {
        return;
    };
    let mut shaper = TextShaper::new();
    assert!(shaper.shape_line(&book, id, "x", 0.0).is_err());
    assert!(shaper.shape_line(&book, id, "x", f64::NAN).is_err());
}
