use super::*;

fn dot(w: u32, h: u32, x: u32, y: u32, px: [u8; 4]) -> Vec<u8> {
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let i = ((y * w + x) * 4) as usize;
    buf[i..i + 4].copy_from_slice(&px);
    buf
}

#[test]
fn shadow_kernel_follows_canvas_sigma() {
    assert!(GaussianKernel::for_shadow(0.0).unwrap().is_none());
    let k = GaussianKernel::for_shadow(10.0).unwrap().unwrap();
    // sigma 5 -> support 15
    assert_eq!(k.radius(), 15);
    assert_eq!(k.weights().len(), 31);
    let k = GaussianKernel::for_shadow(5.0).unwrap().unwrap();
    assert_eq!(k.radius(), 8);
    assert!(GaussianKernel::for_shadow(-1.0).is_err());
    assert!(GaussianKernel::for_shadow(f32::NAN).is_err());
}

#[test]
fn kernel_weights_sum_to_one_and_are_symmetric() {
    let k = GaussianKernel::new(6, 2.5).unwrap();
    let sum: u32 = k.weights().iter().sum();
    assert_eq!(sum, 1 << 16);
    let w = k.weights();
    for i in 0..w.len() / 2 {
        assert_eq!(w[i], w[w.len() - 1 - i]);
    }
}

#[test]
fn zero_radius_kernel_is_identity() {
    let mut buf = dot(3, 3, 1, 1, [9, 8, 7, 200]);
    let before = buf.clone();
    blur_premul_in_place(&mut buf, 3, 3, &GaussianKernel::new(0, 1.0).unwrap()).unwrap();
    assert_eq!(buf, before);
}

#[test]
fn transparent_buffer_stays_transparent() {
    let mut buf = vec![0u8; 8 * 8 * 4];
    let k = GaussianKernel::for_shadow(4.0).unwrap().unwrap();
    blur_premul_in_place(&mut buf, 8, 8, &k).unwrap();
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn single_pixel_spreads_and_conserves_energy() {
    let (w, h) = (21u32, 21u32);
    let mut buf = dot(w, h, 10, 10, [255, 255, 255, 255]);
    let k = GaussianKernel::new(3, 1.2).unwrap();
    blur_premul_in_place(&mut buf, w, h, &k).unwrap();

    let covered = buf.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(covered > 1);
    let sum_a: i32 = buf.chunks_exact(4).map(|px| i32::from(px[3])).sum();
    assert!((sum_a - 255).abs() <= 8, "alpha sum {sum_a}");
    // Far corner untouched.
    assert_eq!(&buf[0..4], &[0, 0, 0, 0]);
}

#[test]
fn edges_fade_instead_of_smearing() {
    let (w, h) = (9u32, 1u32);
    let mut buf = dot(w, h, 0, 0, [0, 0, 0, 255]);
    let k = GaussianKernel::new(2, 1.0).unwrap();
    blur_premul_in_place(&mut buf, w, h, &k).unwrap();
    // With clamp-to-edge the corner pixel would keep most of its weight twice over.
    assert!(buf[3] < 200, "edge alpha {}", buf[3]);
    assert!(buf[4 + 3] > 0);
}

#[test]
fn wrong_length_is_rejected() {
    let mut buf = vec![0u8; 10];
    let k = GaussianKernel::new(1, 1.0).unwrap();
    assert!(blur_premul_in_place(&mut buf, 2, 2, &k).is_err());
}
