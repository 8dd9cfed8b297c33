use image::imageops::FilterType;

use crate::{
    assets::{
        decode::{decode_image, decode_jpeg_raster, flatten_onto_black},
        encode::encode_jpeg,
    },
    composition::model::{INGEST_JPEG_QUALITY, MAX_DIMENSION, NormalizedImage},
    foundation::error::{PostcraftError, PostcraftResult},
};

/// Resampling kernels accepted for downscaling (bilinear or better).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Bilinear.
    #[default]
    Triangle,
    /// Bicubic Catmull-Rom.
    CatmullRom,
    /// Lanczos with window 3.
    Lanczos3,
}

impl ResizeFilter {
    /// Parse a config/env spelling such as `catmull_rom` or `lanczos3`.
    pub fn parse(s: &str) -> PostcraftResult<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmull_rom" | "catmullrom" | "bicubic" => Ok(Self::CatmullRom),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(PostcraftError::config(format!(
                "unknown resize filter '{other}' (expected triangle, catmull_rom or lanczos3)"
            ))),
        }
    }

    fn to_image(self) -> FilterType {
        match self {
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Dimensions after capping the long side at [`MAX_DIMENSION`].
///
/// The long side becomes exactly the cap; the short side is floored in integer
/// arithmetic and never drops below one pixel.
pub fn target_dimensions(width: u32, height: u32) -> (u32, u32) {
    let long = width.max(height);
    if long <= MAX_DIMENSION {
        return (width, height);
    }
    let scale_short = |short: u32| -> u32 {
        let v = u64::from(short) * u64::from(MAX_DIMENSION) / u64::from(long);
        (v as u32).max(1)
    };
    if width >= height {
        (MAX_DIMENSION, scale_short(height))
    } else {
        (scale_short(width), MAX_DIMENSION)
    }
}

/// Decode an upload, cap it at 1000 px and re-encode it as quality-70 JPEG.
///
/// `DecodeError` is the only failure mode for well-formed calls; it is never
/// retried internally.
pub fn normalize(raw: &[u8], declared_mime: Option<&str>) -> PostcraftResult<NormalizedImage> {
    normalize_with(raw, declared_mime, ResizeFilter::default())
}

/// [`normalize`] with an explicit resampling kernel.
#[tracing::instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn normalize_with(
    raw: &[u8],
    declared_mime: Option<&str>,
    filter: ResizeFilter,
) -> PostcraftResult<NormalizedImage> {
    let decoded = decode_image(raw, declared_mime)?;
    let (src_w, src_h) = (decoded.width(), decoded.height());
    let (dst_w, dst_h) = target_dimensions(src_w, src_h);

    let flat = flatten_onto_black(decoded);
    let resized = if (dst_w, dst_h) == (src_w, src_h) {
        flat
    } else {
        image::imageops::resize(&flat, dst_w, dst_h, filter.to_image())
    };

    let jpeg = encode_jpeg(&resized, INGEST_JPEG_QUALITY)?;
    let raster = decode_jpeg_raster(jpeg, INGEST_JPEG_QUALITY)?;
    tracing::debug!(
        src_w,
        src_h,
        dst_w,
        dst_h,
        jpeg_len = raster.jpeg.len(),
        "normalized upload"
    );
    Ok(NormalizedImage(raster))
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/normalize.rs"]
mod tests;
