use super::*;

#[test]
fn filter_css_roundtrips_through_from_css() {
    for f in FilterSpec::ALL {
        assert_eq!(FilterSpec::from_css(f.css()), Some(f));
    }
    assert_eq!(FilterSpec::from_css("blur(2px)"), None);
}

#[test]
fn designs_map_to_faces() {
    assert_eq!(Design::Standard.face(), FontFace::Sans);
    assert_eq!(Design::Serif.face(), FontFace::Serif);
    assert_eq!(Design::Impact.face(), FontFace::Heavy);
    assert_eq!(Design::Pop.face(), FontFace::Sans);
    assert_eq!(Design::Neon.face(), FontFace::Sans);
}

#[test]
fn overlay_defaults_are_centered_and_valid() {
    let o = TextOverlaySpec::default();
    assert!(o.is_empty());
    assert_eq!(o.vertical_pos, 50.0);
    assert_eq!(o.horizontal_pos, 50.0);
    assert_eq!(o.font_scale, 1.0);
    o.validate().unwrap();
}

#[test]
fn overlay_validate_rejects_out_of_range_values() {
    let mut o = TextOverlaySpec::with_text("hi");
    o.vertical_pos = 100.5;
    assert!(o.validate().is_err());

    let mut o = TextOverlaySpec::with_text("hi");
    o.horizontal_pos = f64::NAN;
    assert!(o.validate().is_err());

    let mut o = TextOverlaySpec::with_text("hi");
    o.font_scale = 0.49;
    assert!(o.validate().is_err());
    o.font_scale = 2.0;
    o.validate().unwrap();
}

#[test]
fn overlay_json_uses_camel_case_and_defaults() {
    let o: TextOverlaySpec = serde_json::from_str(
        r##"{"text":"a\nb","design":"pop","color":"#ff007f","verticalPos":25}"##,
    )
    .unwrap();
    assert_eq!(o.text, "a\nb");
    assert_eq!(o.design, Design::Pop);
    assert_eq!(o.color, Rgb8::new(255, 0, 127));
    assert_eq!(o.vertical_pos, 25.0);
    assert_eq!(o.horizontal_pos, 50.0);
    assert_eq!(o.shadow_color, Rgba8::new(0, 0, 0, 179));
}

#[test]
fn stored_jpeg_over_bound_is_rejected() {
    let img = image::RgbImage::from_pixel(1001, 2, image::Rgb([9, 9, 9]));
    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, 70)
        .encode(img.as_raw(), 1001, 2, image::ExtendedColorType::Rgb8)
        .unwrap();

    let err = NormalizedImage::from_jpeg(jpeg).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
    assert!(NormalizedImage::from_jpeg(b"not a jpeg".to_vec())
        .unwrap_err()
        .is_decode());
}
