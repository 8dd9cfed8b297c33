use image::{ExtendedColorType, RgbaImage, codecs::jpeg::JpegEncoder};

use crate::foundation::error::{PostcraftError, PostcraftResult};

/// Encode an opaque RGBA raster as baseline JPEG at `quality` percent.
///
/// The alpha channel is dropped; callers flatten first.
pub fn encode_jpeg(rgba: &RgbaImage, quality: u8) -> PostcraftResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(PostcraftError::encode(format!(
            "jpeg quality {quality} must be within 1..=100"
        )));
    }
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PostcraftError::encode("cannot encode an empty raster"));
    }

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for px in rgba.as_raw().chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| PostcraftError::encode(format!("jpeg: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
