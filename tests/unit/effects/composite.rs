use super::*;

#[test]
fn zero_opacity_and_transparent_src_are_noops() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [200, 200, 200, 200], 0.0), dst);
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
}

#[test]
fn opaque_src_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn half_alpha_black_darkens_opaque_white() {
    // rgba(0,0,0,0.5) premultiplied is [0,0,0,128].
    let out = over([255, 255, 255, 255], [0, 0, 0, 128], 1.0);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 127);
    assert_eq!(out[0], out[1]);
}

#[test]
fn transparent_dst_takes_src() {
    let src = [100, 110, 120, 200];
    assert_eq!(over([0, 0, 0, 0], src, 1.0), src);
}

#[test]
fn layer_over_canvas_keeps_canvas_opaque() {
    let mut canvas = [50u8, 60, 70, 255].repeat(4);
    let mut layer = vec![0u8; 16];
    layer[4..8].copy_from_slice(&[0, 0, 128, 128]);
    over_in_place(&mut canvas, &layer, 1.0).unwrap();

    assert_eq!(&canvas[0..4], &[50, 60, 70, 255]);
    assert_eq!(canvas[7], 255);
    assert!(canvas[6] > 70);
    assert!(over_in_place(&mut canvas, &layer[..8], 1.0).is_err());
}
