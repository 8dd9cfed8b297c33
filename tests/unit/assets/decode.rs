use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn sniffing_beats_declared_mime() {
    let bytes = png_bytes(RgbaImage::new(2, 2));
    assert_eq!(
        detect_format(&bytes, Some("image/jpeg")).unwrap(),
        ImageFormat::Png
    );
    assert_eq!(detect_format(&bytes, None).unwrap(), ImageFormat::Png);
}

#[test]
fn garbage_and_empty_inputs_fail_with_decode() {
    assert!(decode_image(&[], Some("image/png")).unwrap_err().is_decode());
    assert!(decode_image(b"hello world", None).unwrap_err().is_decode());

    // Declared type is trusted when sniffing fails, but the bytes still have to parse.
    let err = decode_image(b"hello world", Some("image/png")).unwrap_err();
    assert!(err.is_decode());
    assert!(err.to_string().contains("image/png"));
}

#[test]
fn truncated_png_fails_with_decode() {
    let bytes = png_bytes(RgbaImage::from_pixel(16, 16, image::Rgba([1, 2, 3, 255])));
    let cut = &bytes[..bytes.len() / 2];
    assert!(decode_image(cut, Some("image/png")).unwrap_err().is_decode());
}

#[test]
fn flatten_composites_over_black() {
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, image::Rgba([200, 100, 50, 128]));
    img.put_pixel(1, 0, image::Rgba([10, 20, 30, 255]));

    let flat = flatten_onto_black(DynamicImage::ImageRgba8(img));
    assert_eq!(flat.get_pixel(0, 0).0, [100, 50, 25, 255]);
    assert_eq!(flat.get_pixel(1, 0).0, [10, 20, 30, 255]);
}
