use super::*;
use crate::{
    assets::{fonts::FontBook, text::TextLayoutEngine},
    composition::model::FontFace,
    foundation::core::Rgb8,
};

const SANS: &[u8] = include_bytes!("../../data/fonts/DejaVuSans.ttf");
const W: u16 = 240;
const H: u16 = 120;

fn placed(text: &str, size: f32) -> PlacedLine {
    let book = FontBook::new().with_face(FontFace::Sans, SANS);
    let mut engine = TextLayoutEngine::new(&book).unwrap();
    let shaped = engine.shape_line(FontFace::Sans, text, size).unwrap();
    PlacedLine::centered(shaped, Point::new(f64::from(W) / 2.0, f64::from(H) / 2.0))
}

fn grey_canvas() -> Vec<u8> {
    [128u8, 128, 128, 255].repeat(usize::from(W) * usize::from(H))
}

fn px(buf: &[u8], x: u32, y: u32) -> [u8; 4] {
    let i = ((y * u32::from(W) + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

fn render(design: Design, color: Rgb8) -> Vec<u8> {
    let line = placed("HI", 48.0);
    let overlay = TextOverlaySpec {
        design,
        color,
        ..TextOverlaySpec::with_text("HI")
    };
    let mut canvas = grey_canvas();
    let mut painter = LayerPainter::new(&mut canvas, W, H);
    draw_design_line(&mut painter, &line, &overlay, 48.0).unwrap();
    canvas
}

fn count(buf: &[u8], pred: impl Fn([u8; 4]) -> bool) -> usize {
    buf.chunks_exact(4)
        .filter(|p| pred([p[0], p[1], p[2], p[3]]))
        .count()
}

#[test]
fn centred_line_straddles_the_centre() {
    let line = placed("HI", 48.0);
    let cx = f64::from(W) / 2.0;
    assert!(line.origin.x < cx);
    assert!((line.origin.x + f64::from(line.shaped.width) - cx - (cx - line.origin.x)).abs() < 1e-3);
    assert!(line.origin.y > f64::from(H) / 2.0);
}

#[test]
fn standard_fills_colour_and_casts_shadow_down_right() {
    let canvas = render(Design::Standard, Rgb8::new(255, 0, 0));
    assert!(count(&canvas, |p| p[0] > 200 && p[1] < 60 && p[2] < 60) > 50);
    // Shadow darkens the grey background somewhere.
    assert!(count(&canvas, |p| p[0] < 110 && p[1] < 110 && p[2] < 110) > 20);
    assert!(canvas.chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn pop_adds_white_outline() {
    let red = Rgb8::new(255, 0, 0);
    let std_white = count(&render(Design::Standard, red), |p| p[0] > 240 && p[1] > 240 && p[2] > 240);
    let pop_white = count(&render(Design::Pop, red), |p| p[0] > 240 && p[1] > 240 && p[2] > 240);
    assert_eq!(std_white, 0);
    assert!(pop_white > 50, "white outline pixels: {pop_white}");
}

#[test]
fn neon_has_white_core_and_coloured_glow() {
    let canvas = render(Design::Neon, Rgb8::new(0, 0, 255));
    assert!(count(&canvas, |p| p[0] > 240 && p[1] > 240 && p[2] > 240) > 50);
    // Glow tints background pixels blue without covering them fully.
    assert!(count(&canvas, |p| p[2] > 150 && p[0] < 120 && p[0] > 20) > 50);
}

#[test]
fn transparent_shadow_is_skipped() {
    let line = placed("HI", 48.0);
    let mut with = grey_canvas();
    let mut without = grey_canvas();
    let color = Rgba8::new(10, 200, 10, 255);
    LayerPainter::new(&mut with, W, H)
        .draw(&line, Ink::Fill, color, Some(DropShadow::standard(Rgba8::TRANSPARENT)))
        .unwrap();
    LayerPainter::new(&mut without, W, H)
        .draw(&line, Ink::Fill, color, None)
        .unwrap();
    assert_eq!(with, without);
}

#[test]
fn far_corner_is_untouched() {
    for design in Design::ALL {
        let canvas = render(design, Rgb8::new(255, 0, 127));
        assert_eq!(px(&canvas, 0, 0), [128, 128, 128, 255], "{design:?}");
    }
}
