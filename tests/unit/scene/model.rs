use super::*;
use serde_json::json;

fn canvas() -> Canvas {
    Canvas::new(800, 1200).unwrap()
}

#[test]
fn layers_follow_structural_order() {
    let mut scene = Scene::new(canvas());
    scene
        .texts
        .push(TextLayer::new("a", "Poppins", 20.0, Vec2::new(0.0, 0.0)));
    scene
        .texts
        .push(TextLayer::new("b", "Poppins", 20.0, Vec2::new(0.0, 0.0)));
    scene.photo = Some(PhotoLayer::new(PlaceholderRegion::new(
        0.0, 0.0, 100.0, 100.0,
    )));

    let kinds: Vec<&str> = scene
        .layers()
        .map(|l| match l {
            LayerRef::Background(_) => "bg",
            LayerRef::Photo(_) => "photo",
            LayerRef::Text(0, _) => "text0",
            LayerRef::Text(_, _) => "text1",
        })
        .collect();
    assert_eq!(kinds, vec!["bg", "photo", "text0", "text1"]);
}

#[test]
fn region_extents_clamp_to_floor() {
    let mut r = PlaceholderRegion::new(5.0, 5.0, 0.0, -20.0);
    assert_eq!(r.width(), MIN_REGION_EXTENT);
    assert_eq!(r.height(), MIN_REGION_EXTENT);

    r.set_width(3.0);
    assert_eq!(r.width(), 3.0);

    r.set_width(f64::NAN);
    assert_eq!(r.width(), MIN_REGION_EXTENT);
    r.set_width(f64::INFINITY);
    assert_eq!(r.width(), MIN_REGION_EXTENT);
    r.set_height(250.0);
    assert_eq!(r.height(), 250.0);
    assert_eq!(r.center(), Point::new(10.0, 130.0));
}

#[test]
fn transform_scale_and_font_size_clamp() {
    let mut t = PhotoTransform::default();
    assert_eq!(t.scale(), 1.0);
    t.set_scale(0.01);
    assert_eq!(t.scale(), 0.01);
    t.set_scale(0.0);
    assert_eq!(t.scale(), MIN_PHOTO_SCALE);
    t.set_scale(-3.0);
    assert_eq!(t.scale(), MIN_PHOTO_SCALE);
    t.set_scale(f64::INFINITY);
    assert_eq!(t.scale(), MIN_PHOTO_SCALE);

    let mut text = TextLayer::new("x", "Poppins", -4.0, Vec2::ZERO);
    assert_eq!(text.font_size_px(), MIN_FONT_SIZE_PX);
    text.set_font_size_px(48.0);
    assert_eq!(text.font_size_px(), 48.0);
    text.set_font_size_px(f64::NEG_INFINITY);
    assert_eq!(text.font_size_px(), MIN_FONT_SIZE_PX);
}

#[test]
fn deserialization_applies_the_same_floors() {
    let region: PlaceholderRegion =
        serde_json::from_value(json!({"x": 1, "y": 2, "width": 0, "height": 5})).unwrap();
    assert_eq!(region.width(), MIN_REGION_EXTENT);
    assert_eq!(region.height(), 5.0);

    let t: PhotoTransform = serde_json::from_value(json!({"scale": 0.0})).unwrap();
    assert_eq!(t.scale(), MIN_PHOTO_SCALE);
    let t: PhotoTransform = serde_json::from_value(json!({})).unwrap();
    assert_eq!(t, PhotoTransform::default());

    let text: TextLayer = serde_json::from_value(json!({
        "content": "hi",
        "font_family": "Poppins",
        "font_size_px": 0,
        "color": "#ffffff",
        "anchor": {"x": 400, "y": 150}
    }))
    .unwrap();
    assert_eq!(text.font_size_px(), MIN_FONT_SIZE_PX);
    assert_eq!(text.line_height, DEFAULT_LINE_HEIGHT);
    assert_eq!(text.align, HorizontalAlign::Left);
}

#[test]
fn line_spacing_prefers_absolute_then_multiplier_then_default() {
    let mut t = TextLayer::new("x", "Poppins", 48.0, Vec2::ZERO);
    assert!((t.line_spacing_px() - 57.6).abs() < 1e-9);

    t.line_height = 0.0;
    assert!((t.line_spacing_px() - 57.6).abs() < 1e-9);

    t.line_height = 2.0;
    assert_eq!(t.line_spacing_px(), 96.0);

    t.line_height_px = Some(40.0);
    assert_eq!(t.line_spacing_px(), 40.0);
}

#[test]
fn weight_overrides_bold_flag() {
    let mut t = TextLayer::new("x", "Poppins", 48.0, Vec2::ZERO);
    assert_eq!(t.font_descriptor().weight, FontWeight::NORMAL);
    t.bold = true;
    assert_eq!(t.font_descriptor().weight, FontWeight::BOLD);
    t.weight = Some(800);
    assert_eq!(t.font_descriptor().weight.value(), 800);
}

#[test]
fn scene_json_defaults_and_validation() {
    let scene = Scene::from_json_str(r#"{"canvas":{"width":800,"height":1200}}"#).unwrap();
    assert_eq!(scene.background, BackgroundLayer::default());
    assert!(scene.photo.is_none());
    assert!(scene.texts.is_empty());

    let err = Scene::from_json_str(r#"{"canvas":{"width":0,"height":1200}}"#).unwrap_err();
    assert!(matches!(err, PosterError::Validation(_)));

    let err = Scene::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, PosterError::Serde(_)));
}

#[test]
fn solid_fill_json_shape() {
    let bg: BackgroundLayer = serde_json::from_value(json!({
        "fill": {
            "kind": "solid",
            "color": "#1550B3",
            "ornaments": [{"glyph": "A", "x": 10, "y": 20, "size_px": 80, "color": "#FFFFFF"}]
        }
    }))
    .unwrap();
    match bg.fill {
        BackgroundFill::Solid { ornaments, .. } => {
            assert_eq!(ornaments.len(), 1);
            assert_eq!(ornaments[0].font_family, "Inter");
            assert_eq!(ornaments[0].rotation_deg, 0.0);
        }
        BackgroundFill::Gradient { .. } => panic!("expected solid fill"),
    }
}
