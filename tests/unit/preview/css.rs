use super::*;
use crate::layout::overlay::plan_overlay;

#[test]
fn standard_preview_uses_drop_shadow() {
    let p = describe(500, 400, &FilterSpec::Warm, &TextOverlaySpec::with_text("hi")).unwrap();
    assert_eq!(p.filter, "sepia(0.3)");
    assert_eq!(p.font_family, "sans-serif");
    assert!((p.font_size_px - 40.0).abs() < 1e-9);
    assert_eq!(p.color, "#ffffff");
    assert_eq!(p.text_shadow.as_deref(), Some("2px 2px 10px rgba(0,0,0,0.702)"));
    assert!(p.text_stroke.is_none());
    assert!(p.paint_order.is_none());
}

#[test]
fn pop_preview_strokes_beneath_fill() {
    let overlay = TextOverlaySpec {
        design: Design::Pop,
        color: Rgb8::new(255, 0, 127),
        ..TextOverlaySpec::with_text("a\nb")
    };
    let p = describe(1000, 500, &FilterSpec::Grayscale, &overlay).unwrap();
    assert_eq!(p.text_stroke.as_deref(), Some("12px #ffffff"));
    assert_eq!(p.paint_order.as_deref(), Some("stroke fill"));
    assert_eq!(p.text_shadow.as_deref(), Some("3px 3px 5px rgba(0,0,0,0.2)"));
    assert_eq!(p.color, "#ff007f");
    assert!(p.css_declarations().contains("paint-order: stroke fill"));
}

#[test]
fn neon_preview_glows_in_fill_colour() {
    let overlay = TextOverlaySpec {
        design: Design::Neon,
        color: Rgb8::new(0, 255, 0),
        ..TextOverlaySpec::with_text("glow")
    };
    let p = describe(300, 300, &FilterSpec::None, &overlay).unwrap();
    assert_eq!(p.color, "#ffffff");
    assert_eq!(p.text_shadow.as_deref(), Some("0px 0px 15px rgba(0,255,0,1)"));
}

#[test]
fn lines_match_export_layout() {
    let overlay = TextOverlaySpec {
        vertical_pos: 30.0,
        horizontal_pos: 70.0,
        font_scale: 1.5,
        ..TextOverlaySpec::with_text("one\ntwo\nthree")
    };
    let p = describe(640, 480, &FilterSpec::None, &overlay).unwrap();
    let l = plan_overlay(640, 480, &overlay).unwrap();
    assert_eq!(p.lines.len(), 3);
    for (pl, slot) in p.lines.iter().zip(&l.lines) {
        assert_eq!(pl.left_px, slot.center.x);
        assert_eq!(pl.top_px, slot.center.y);
        assert!((pl.left_percent - 70.0).abs() < 1e-9);
    }
    assert!((p.lines[1].top_percent - 30.0).abs() < 1e-9);
}

#[test]
fn preview_serializes_to_json() {
    let p = describe(100, 100, &FilterSpec::None, &TextOverlaySpec::with_text("x")).unwrap();
    let v: serde_json::Value = serde_json::to_value(&p).unwrap();
    assert_eq!(v["filter"], "none");
    assert_eq!(v["lines"][0]["text"], "x");
}

#[test]
fn zero_display_is_rejected() {
    assert!(describe(0, 10, &FilterSpec::None, &TextOverlaySpec::default()).is_err());
}
