use super::*;

#[test]
fn campaign_matches_reference_layout() {
    let s = campaign_poster();
    assert_eq!((s.canvas.width, s.canvas.height), (800, 1200));
    s.validate().unwrap();

    let photo = s.photo.as_ref().unwrap();
    assert_eq!(photo.region, PlaceholderRegion::new(200.0, 300.0, 400.0, 400.0));
    assert_eq!(photo.transform.scale(), 1.0);
    assert_eq!(photo.caption, "User photo here");

    let t = &s.texts[0];
    assert_eq!(t.content, "Your Poster Title\nYour Tagline Here");
    assert_eq!(t.font_size_px(), 48.0);
    assert!(t.bold);
    assert_eq!(t.align, HorizontalAlign::Center);
    assert_eq!(t.anchor, Vec2::new(400.0, 150.0));
    assert_eq!(t.line_height, 1.2);
    assert_eq!(t.color.to_rgba8(), crate::foundation::core::Rgba8::opaque(255, 255, 255));

    match &s.background.fill {
        BackgroundFill::Gradient { top, bottom } => {
            assert_eq!(top.to_rgba8(), crate::foundation::core::Rgba8::opaque(15, 23, 42));
            assert_eq!(bottom.to_rgba8(), crate::foundation::core::Rgba8::opaque(31, 41, 55));
        }
        BackgroundFill::Solid { .. } => panic!("campaign uses a gradient"),
    }
}

#[test]
fn word_of_the_day_layout() {
    let s = word_of_the_day("Brave", "Ready to face danger.", "She was brave.");
    assert_eq!((s.canvas.width, s.canvas.height), (1080, 1350));
    assert!(s.photo.is_none());
    assert_eq!(s.texts.len(), 5);

    let ys: Vec<f64> = s.texts.iter().map(|t| t.anchor.y).collect();
    assert_eq!(ys, vec![660.0, 740.0, 790.0, 910.0, 960.0]);
    assert!(s.texts.iter().all(|t| t.anchor.x == 540.0));
    assert!(s.texts.iter().all(|t| t.baseline == TextBaseline::Middle));

    assert_eq!(s.texts[0].content, "Brave");
    assert_eq!(s.texts[0].weight, Some(800));
    assert_eq!(s.texts[2].max_width_px, Some(600.0));
    assert_eq!(s.texts[2].line_spacing_px(), 40.0);
    assert_eq!(s.texts[4].max_width_px, Some(700.0));
    assert_eq!(s.texts[4].line_spacing_px(), 25.0);

    match &s.background.fill {
        BackgroundFill::Solid { ornaments, .. } => assert_eq!(ornaments.len(), 9),
        BackgroundFill::Gradient { .. } => panic!("word of the day uses a solid fill"),
    }
}

#[test]
fn templates_survive_json() {
    for kind in [TemplateKind::Campaign, TemplateKind::WordOfTheDay] {
        let scene = kind.scene();
        let json = scene.to_json_pretty().unwrap();
        let back = Scene::from_json_str(&json).unwrap();
        assert_eq!(back, scene, "{}", kind.name());
    }
}

#[test]
fn template_names_parse() {
    assert_eq!("campaign".parse::<TemplateKind>().unwrap(), TemplateKind::Campaign);
    assert_eq!(
        "word-of-the-day".parse::<TemplateKind>().unwrap(),
        TemplateKind::WordOfTheDay
    );
    assert!("flyer".parse::<TemplateKind>().is_err());
}
