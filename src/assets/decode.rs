use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::{
    composition::model::EncodedRaster,
    foundation::error::{PostcraftError, PostcraftResult},
};

/// Identify the raster format of `bytes`.
///
/// Magic-byte sniffing wins; the declared MIME type is only consulted when the
/// content is not recognised. Formats this build cannot read are rejected.
pub fn detect_format(bytes: &[u8], declared_mime: Option<&str>) -> PostcraftResult<ImageFormat> {
    if bytes.is_empty() {
        return Err(PostcraftError::decode("input is empty"));
    }

    let format = image::guess_format(bytes)
        .ok()
        .or_else(|| declared_mime.and_then(ImageFormat::from_mime_type))
        .ok_or_else(|| match declared_mime {
            Some(mime) => {
                PostcraftError::decode(format!("unrecognised image data (declared '{mime}')"))
            }
            None => PostcraftError::decode("unrecognised image data"),
        })?;

    if !format.reading_enabled() {
        return Err(PostcraftError::decode(format!(
            "{} images are not supported",
            format.to_mime_type()
        )));
    }
    Ok(format)
}

/// Decode arbitrary upload bytes into a bitmap.
pub fn decode_image(bytes: &[u8], declared_mime: Option<&str>) -> PostcraftResult<DynamicImage> {
    let format = detect_format(bytes, declared_mime)?;
    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| PostcraftError::decode(format!("{}: {e}", format.to_mime_type())))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(PostcraftError::decode("image has zero width or height"));
    }
    Ok(img)
}

/// Composite the bitmap over opaque black and force alpha to 255.
///
/// JPEG has no alpha channel; transparent regions export as black.
pub fn flatten_onto_black(img: DynamicImage) -> RgbaImage {
    let mut rgba = img.into_rgba8();
    for px in rgba.pixels_mut() {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in 0..3 {
            px[c] = ((u16::from(px[c]) * a + 127) / 255) as u8;
        }
        px[3] = 255;
    }
    rgba
}

pub(crate) fn decode_jpeg_raster(jpeg: Vec<u8>, quality: u8) -> PostcraftResult<EncodedRaster> {
    let img = image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg)
        .map_err(|e| PostcraftError::decode(format!("image/jpeg: {e}")))?;
    let pixels = flatten_onto_black(img);
    let (width, height) = pixels.dimensions();
    if width == 0 || height == 0 {
        return Err(PostcraftError::decode("image has zero width or height"));
    }

    Ok(EncodedRaster {
        width,
        height,
        quality,
        jpeg,
        pixels,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
