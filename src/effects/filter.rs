use image::RgbaImage;

use crate::composition::model::FilterSpec;

/// 3x3 colour matrix applied to sRGB-encoded channel values.
pub type ColorMatrix = [[f32; 3]; 3];

/// Matrix for the CSS `sepia(amount)` filter function.
pub fn sepia_matrix(amount: f32) -> ColorMatrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ]
}

/// Matrix for the CSS `grayscale(amount)` filter function.
pub fn grayscale_matrix(amount: f32) -> ColorMatrix {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    [
        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
    ]
}

/// Matrix for the CSS `brightness(factor)` filter function.
pub fn brightness_matrix(factor: f32) -> ColorMatrix {
    let f = factor.max(0.0);
    [[f, 0.0, 0.0], [0.0, f, 0.0], [0.0, 0.0, f]]
}

/// Matrix equivalent of `filter`, or `None` for the identity.
pub fn filter_matrix(filter: FilterSpec) -> Option<ColorMatrix> {
    match filter {
        FilterSpec::None => None,
        FilterSpec::Brighten => Some(brightness_matrix(FilterSpec::BRIGHTEN_FACTOR)),
        FilterSpec::Warm => Some(sepia_matrix(FilterSpec::WARM_SEPIA)),
        FilterSpec::Grayscale => Some(grayscale_matrix(1.0)),
    }
}

/// Apply a colour matrix to one straight RGB triple, rounding and clamping.
pub fn apply_matrix(m: &ColorMatrix, rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(f32::from);
    let mut out = [0u8; 3];
    for (o, row) in out.iter_mut().zip(m) {
        let v = row[0] * r + row[1] * g + row[2] * b;
        *o = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Apply `filter` to every pixel in place. Alpha is left untouched.
pub fn apply_filter_in_place(img: &mut RgbaImage, filter: FilterSpec) {
    let Some(m) = filter_matrix(filter) else {
        return;
    };
    for px in img.pixels_mut() {
        let [r, g, b] = apply_matrix(&m, [px[0], px[1], px[2]]);
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
}

/// Filtered copy of `img`.
pub fn apply_filter(img: &RgbaImage, filter: FilterSpec) -> RgbaImage {
    let mut out = img.clone();
    apply_filter_in_place(&mut out, filter);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
