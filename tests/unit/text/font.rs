use super::*;

#[test]
fn css_shorthand_matches_browser_font_strings() {
    let mut d = FontDescriptor::new("Poppins", 48.0);
    d.weight = FontWeight::BOLD;
    assert_eq!(
        d.css(),
        "bold 48px Poppins, system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", sans-serif"
    );

    d.italic = true;
    d.weight = FontWeight::new(800);
    d.size_px = 120.0;
    assert!(d.css().starts_with("italic 800 120px Poppins, "));

    let plain = FontDescriptor::new("Inter", 14.5);
    assert!(plain.css().starts_with("14.5px Inter, system-ui"));
}

#[test]
fn stack_starts_with_family_and_skips_duplicates() {
    let d = FontDescriptor::new("sans-serif", 10.0);
    let stack = d.stack();
    assert_eq!(stack.first(), Some(&"sans-serif"));
    assert_eq!(stack.iter().filter(|f| **f == "sans-serif").count(), 1);
    assert_eq!(stack.len(), GENERIC_FALLBACK_STACK.len());
}

#[test]
fn weight_clamps_and_measures_distance() {
    assert_eq!(FontWeight::new(0).value(), 1);
    assert_eq!(FontWeight::new(5000).value(), 1000);
    assert_eq!(FontWeight::BOLD.distance(FontWeight::new(800)), 100);
    assert_eq!(FontWeight::default(), FontWeight::NORMAL);
}
