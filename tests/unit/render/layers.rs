use super::*;
use crate::assets::color::ColorDef;
use crate::assets::fonts::FaceStyle;
use crate::foundation::core::Vec2;
use crate::scene::model::PlaceholderRegion;
use crate::test_support::local_font_bytes;

fn px(bytes: &[u8], w: usize, x: usize, y: usize) -> [u8; 4] {
    let i = (y * w + x) * 4;
    [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
}

struct Fixture {
    images: ImageStore,
    fonts: FontBook,
    shaper: TextShaper,
    paints: ImagePaintCache,
    style: PlaceholderStyle,
}

impl Fixture {
    fn new() -> Self {
        Self {
            images: ImageStore::new(),
            fonts: FontBook::new(),
            shaper: TextShaper::new(),
            paints: ImagePaintCache::default(),
            style: PlaceholderStyle::default(),
        }
    }

    fn with_local_font(mut self, family: &str) -> Option<Self> {
        let bytes = local_font_bytes()?;
        self.fonts
            .register(family, FaceStyle::regular(), bytes)
            .unwrap();
        Some(self)
    }

    fn res(&mut self) -> LayerResources<'_> {
        LayerResources {
            images: &self.images,
            fonts: &self.fonts,
            shaper: &mut self.shaper,
            paints: &mut self.paints,
            placeholder: &self.style,
        }
    }
}

fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> RasterImage {
    let bytes = rgba.repeat((w * h) as usize);
    RasterImage::from_rgba8(w, h, bytes).unwrap()
}

fn any_ink(bytes: &[u8], w: usize, rect: (usize, usize, usize, usize)) -> bool {
    let (x0, y0, x1, y1) = rect;
    (y0..y1).any(|y| (x0..x1).any(|x| px(bytes, w, x, y)[3] != 0))
}

fn ink_rows(bytes: &[u8], w: usize, h: usize) -> Vec<usize> {
    (0..h)
        .filter(|&y| (0..w).any(|x| px(bytes, w, x, y)[3] != 0))
        .collect()
}

/// Too wide for the raster backend; only reachable by building the struct directly.
fn oversized_image() -> RasterImage {
    RasterImage {
        width: 70_000,
        height: 1,
        rgba8_premul: Arc::new([255u8, 0, 0, 255].repeat(70_000)),
    }
}

#[test]
fn gradient_rows_hit_both_endpoints_exactly() {
    let mut fx = Fixture::new();
    let bg = BackgroundLayer {
        image: None,
        fill: BackgroundFill::Gradient {
            top: ColorDef::rgba8(0, 0, 0, 1.0),
            bottom: ColorDef::rgba8(200, 100, 50, 1.0),
        },
    };

    let mut p = Painter::new(4, 11);
    render_background(&mut p, &bg, &mut fx.res()).unwrap();
    let bytes = p.finish();

    assert_eq!(px(&bytes, 4, 0, 0), [0, 0, 0, 255]);
    assert_eq!(px(&bytes, 4, 3, 10), [200, 100, 50, 255]);
    assert_eq!(px(&bytes, 4, 2, 5), [100, 50, 25, 255]);
}

#[test]
fn solid_fill_skips_ornaments_without_fonts() {
    let mut fx = Fixture::new();
    let bg = BackgroundLayer {
        image: None,
        fill: BackgroundFill::Solid {
            color: ColorDef::rgba8(10, 20, 30, 1.0),
            ornaments: vec![Ornament {
                glyph: "A".into(),
                x: 4.0,
                y: 4.0,
                size_px: 6.0,
                color: ColorDef::white(),
                rotation_deg: 30.0,
                font_family: "Inter".into(),
            }],
        },
    };

    let mut p = Painter::new(8, 8);
    render_background(&mut p, &bg, &mut fx.res()).unwrap();
    let bytes = p.finish();
    assert!(bytes.chunks_exact(4).all(|c| c == [10, 20, 30, 255]));
}

#[test]
fn background_image_covers_canvas_and_wins_over_fill() {
    let mut fx = Fixture::new();
    fx.images.insert("bg", solid_image(3, 2, [0, 0, 255, 255]));
    let bg = BackgroundLayer {
        image: Some("bg".into()),
        fill: BackgroundFill::default(),
    };

    let mut p = Painter::new(10, 20);
    render_background(&mut p, &bg, &mut fx.res()).unwrap();
    let bytes = p.finish();
    for (x, y) in [(0, 0), (9, 0), (5, 10), (0, 19), (9, 19)] {
        assert_eq!(px(&bytes, 10, x, y), [0, 0, 255, 255], "pixel {x},{y}");
    }
}

#[test]
fn missing_background_image_falls_back_to_fill() {
    let mut fx = Fixture::new();
    let bg = BackgroundLayer {
        image: Some("nowhere".into()),
        fill: BackgroundFill::Solid {
            color: ColorDef::rgba8(1, 2, 3, 1.0),
            ornaments: Vec::new(),
        },
    };

    let mut p = Painter::new(4, 4);
    render_background(&mut p, &bg, &mut fx.res()).unwrap();
    assert_eq!(px(&p.finish(), 4, 2, 2), [1, 2, 3, 255]);
}

#[test]
fn unpaintable_background_image_falls_back_to_fill() {
    let mut fx = Fixture::new();
    fx.images.insert("bg", oversized_image());
    let bg = BackgroundLayer {
        image: Some("bg".into()),
        fill: BackgroundFill::Gradient {
            top: ColorDef::rgba8(15, 23, 42, 1.0),
            bottom: ColorDef::rgba8(31, 41, 55, 1.0),
        },
    };

    let mut p = Painter::new(50, 50);
    render_background(&mut p, &bg, &mut fx.res()).unwrap();
    let bytes = p.finish();
    assert_eq!(px(&bytes, 50, 0, 0), [15, 23, 42, 255]);
    assert_eq!(px(&bytes, 50, 49, 49), [31, 41, 55, 255]);
}

#[test]
fn unpaintable_photo_draws_the_placeholder() {
    let mut fx = Fixture::new();
    fx.images.insert("photo", oversized_image());
    let mut layer = PhotoLayer::new(PlaceholderRegion::new(8.0, 8.0, 40.0, 40.0));
    layer.image = Some("photo".into());

    let mut p = Painter::new(56, 56);
    render_photo_layer(&mut p, &layer, &mut fx.res()).unwrap();
    assert_eq!(p.clip_depth(), 0);
    let bytes = p.finish();

    assert!(any_ink(&bytes, 56, (6, 6, 50, 10)));
    assert!(!any_ink(&bytes, 56, (12, 12, 44, 44)));
}

#[test]
fn photo_stays_inside_region_even_when_scaled_up() {
    let mut fx = Fixture::new();
    fx.images.insert("photo", solid_image(40, 40, [255, 0, 0, 255]));
    let mut layer = PhotoLayer::new(PlaceholderRegion::new(4.0, 4.0, 12.0, 12.0));
    layer.image = Some("photo".into());
    layer.transform.set_scale(1.5);
    layer.transform.rotation_deg = 45.0;

    let mut p = Painter::new(24, 24);
    render_photo_layer(&mut p, &layer, &mut fx.res()).unwrap();
    assert_eq!(p.clip_depth(), 0);
    let bytes = p.finish();

    assert_eq!(px(&bytes, 24, 10, 10), [255, 0, 0, 255]);
    assert_eq!(px(&bytes, 24, 0, 0), [0, 0, 0, 0]);
    assert_eq!(px(&bytes, 24, 20, 20), [0, 0, 0, 0]);
    assert_eq!(px(&bytes, 24, 10, 22), [0, 0, 0, 0]);
}

#[test]
fn empty_photo_slot_draws_only_the_dashed_outline_without_fonts() {
    let mut fx = Fixture::new();
    let layer = PhotoLayer::new(PlaceholderRegion::new(8.0, 8.0, 40.0, 40.0));

    let mut p = Painter::new(56, 56);
    render_photo_layer(&mut p, &layer, &mut fx.res()).unwrap();
    let bytes = p.finish();

    assert!(any_ink(&bytes, 56, (6, 6, 50, 10)));
    assert!(!any_ink(&bytes, 56, (12, 12, 44, 44)));
    assert!(!any_ink(&bytes, 56, (0, 0, 56, 5)));
}

#[test]
fn dashed_outline_leaves_gaps() {
    let path = dashed_outline(Rect::new(0.0, 0.0, 100.0, 10.0), &[8.0, 6.0]);
    let moves = path
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    assert!(moves > 10, "expected many dash segments, got {moves}");
}

#[test]
fn text_without_matching_font_is_skipped() {
    let mut fx = Fixture::new();
    let layer = TextLayer::new("Hello", "Poppins", 20.0, Vec2::new(4.0, 20.0));

    let mut p = Painter::new(32, 32);
    render_text_layer(&mut p, &layer, &mut fx.res()).unwrap();
    assert!(p.finish().iter().all(|&b| b == 0));
}

#[test]
fn text_draws_near_its_anchor_if_present() {
    let Some(mut fx) = Fixture::new().with_local_font("Poppins") else {
        return;
    };
    let layer = TextLayer::new("Hello", "Poppins", 24.0, Vec2::new(8.0, 40.0));

    let mut p = Painter::new(120, 64);
    render_text_layer(&mut p, &layer, &mut fx.res()).unwrap();
    let bytes = p.finish();

    assert!(any_ink(&bytes, 120, (8, 16, 100, 41)));
    assert!(!any_ink(&bytes, 120, (0, 0, 120, 8)));
    assert!(!any_ink(&bytes, 120, (0, 0, 6, 64)));
}

#[test]
fn middle_baseline_moves_text_down_if_present() {
    let Some(mut fx) = Fixture::new().with_local_font("Inter") else {
        return;
    };
    let mut layer = TextLayer::new("Hxg", "Inter", 24.0, Vec2::new(8.0, 32.0));

    let rendered_rows = |fx: &mut Fixture, layer: &TextLayer| {
        let mut p = Painter::new(80, 64);
        render_text_layer(&mut p, layer, &mut fx.res()).unwrap();
        ink_rows(&p.finish(), 80, 64)
    };

    let alphabetic = rendered_rows(&mut fx, &layer);
    layer.baseline = TextBaseline::Middle;
    let middle = rendered_rows(&mut fx, &layer);

    assert!(!alphabetic.is_empty() && !middle.is_empty());
    assert!(middle[0] > alphabetic[0]);
}

#[test]
fn wrapped_text_spreads_over_several_lines_if_present() {
    let Some(mut fx) = Fixture::new().with_local_font("Inter") else {
        return;
    };
    let mut layer = TextLayer::new(
        "one two three four five six",
        "Inter",
        16.0,
        Vec2::new(4.0, 20.0),
    );
    layer.max_width_px = Some(40.0);

    let mut p = Painter::new(200, 160);
    render_text_layer(&mut p, &layer, &mut fx.res()).unwrap();
    let rows = ink_rows(&p.finish(), 200, 160);

    let bands = rows
        .iter()
        .enumerate()
        .filter(|&(i, &y)| i == 0 || rows[i - 1] + 1 != y)
        .count();
    assert!(bands >= 3, "expected at least three line bands, got {bands}");
    assert!(rows.last().is_some_and(|&y| y > 58));
}

#[test]
fn placeholder_caption_draws_inside_the_region_if_present() {
    let Some(mut fx) = Fixture::new().with_local_font("Poppins") else {
        return;
    };
    let layer = PhotoLayer::new(PlaceholderRegion::new(10.0, 10.0, 180.0, 60.0));

    let mut p = Painter::new(200, 80);
    render_photo_layer(&mut p, &layer, &mut fx.res()).unwrap();
    let bytes = p.finish();

    assert!(any_ink(&bytes, 200, (20, 20, 180, 60)));
    assert!(!any_ink(&bytes, 200, (20, 20, 40, 60)));
}

#[test]
fn paint_cache_reuses_only_the_same_image() {
    let mut cache = ImagePaintCache::default();
    let mut store = ImageStore::new();
    store.insert("a", solid_image(1, 1, [1, 2, 3, 255]));

    let first = Arc::clone(store.get("a").unwrap());
    cache.paint_for("a", &first).unwrap();
    cache.paint_for("a", &first).unwrap();
    assert_eq!(cache.entries.len(), 1);

    store.insert("a", solid_image(1, 1, [9, 9, 9, 255]));
    let second = Arc::clone(store.get("a").unwrap());
    cache.paint_for("a", &second).unwrap();
    assert!(Arc::ptr_eq(&cache.entries["a"].0, &second));

    store.remove("a");
    cache.retain_keys(&store);
    assert!(cache.entries.is_empty());
}
