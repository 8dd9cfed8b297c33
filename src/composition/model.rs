use crate::foundation::{
    core::{Rgb8, Rgba8},
    error::{PostcraftError, PostcraftResult},
};

/// Longest side, in pixels, of every normalized upload.
pub const MAX_DIMENSION: u32 = 1000;
/// JPEG quality (percent) used when re-encoding uploads.
pub const INGEST_JPEG_QUALITY: u8 = 70;
/// JPEG quality (percent) used for exported compositions.
pub const EXPORT_JPEG_QUALITY: u8 = 80;
/// Suggested download name for exported compositions.
pub const EXPORT_FILE_NAME: &str = "processed-image.jpg";

/// Colour filter applied to the whole canvas before text is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterSpec {
    /// Identity.
    #[default]
    None,
    /// Multiply every channel by 1.2.
    Brighten,
    /// 30% sepia.
    Warm,
    /// Full desaturation.
    Grayscale,
}

impl FilterSpec {
    /// Every filter, in UI order.
    pub const ALL: [FilterSpec; 4] = [Self::None, Self::Brighten, Self::Warm, Self::Grayscale];

    /// Brighten channel multiplier.
    pub const BRIGHTEN_FACTOR: f32 = 1.2;
    /// Warm sepia amount.
    pub const WARM_SEPIA: f32 = 0.3;

    /// CSS `filter` value equivalent to this filter.
    pub fn css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Brighten => "brightness(1.2)",
            Self::Warm => "sepia(0.3)",
            Self::Grayscale => "grayscale(1)",
        }
    }

    /// Parse the value produced by [`FilterSpec::css`].
    pub fn from_css(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|f| f.css() == s)
    }

    /// Short label shown next to the filter swatch.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "なし",
            Self::Brighten => "明るく",
            Self::Warm => "暖かく",
            Self::Grayscale => "モノクロ",
        }
    }
}

/// One of the fixed text rendering styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Design {
    /// Sans-serif fill with a drop shadow.
    #[default]
    Standard,
    /// Serif fill with a drop shadow.
    Serif,
    /// White round-joined outline under a softly shadowed fill.
    Pop,
    /// Heavy condensed fill with a drop shadow.
    Impact,
    /// Coloured glow with a white core.
    Neon,
}

impl Design {
    /// Every design, in UI order.
    pub const ALL: [Design; 5] = [
        Self::Standard,
        Self::Serif,
        Self::Pop,
        Self::Impact,
        Self::Neon,
    ];

    /// Face this design draws with.
    pub fn face(self) -> FontFace {
        match self {
            Self::Serif => FontFace::Serif,
            Self::Impact => FontFace::Heavy,
            Self::Standard | Self::Pop | Self::Neon => FontFace::Sans,
        }
    }
}

/// Font faces a [`crate::FontBook`] can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    /// Regular sans-serif.
    Sans,
    /// Regular serif.
    Serif,
    /// Heavy / condensed display face.
    Heavy,
}

impl FontFace {
    /// CSS generic family used by the preview when the face is not web-loaded.
    pub fn css_generic(self) -> &'static str {
        match self {
            Self::Sans => "sans-serif",
            Self::Serif => "serif",
            Self::Heavy => "Impact, 'Arial Black', sans-serif",
        }
    }

    /// CSS font weight for the face.
    pub fn css_weight(self) -> u16 {
        match self {
            Self::Heavy => 900,
            Self::Sans | Self::Serif => 400,
        }
    }
}

/// Text overlay parameters for one render.
///
/// An empty `text` disables overlay rendering entirely.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextOverlaySpec {
    /// Text, possibly multi-line (`\n` separated).
    pub text: String,
    /// Rendering style.
    pub design: Design,
    /// Fill colour.
    pub color: Rgb8,
    /// Drop shadow colour for the shadowed designs.
    pub shadow_color: Rgba8,
    /// Anchor Y as a percentage of image height, `[0, 100]`.
    pub vertical_pos: f64,
    /// Anchor X as a percentage of image width, `[0, 100]`.
    pub horizontal_pos: f64,
    /// Multiplier on the base font size, `[0.5, 2.0]`.
    pub font_scale: f64,
}

impl Default for TextOverlaySpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            design: Design::Standard,
            color: Rgb8::WHITE,
            shadow_color: Rgba8::new(0, 0, 0, 179),
            vertical_pos: 50.0,
            horizontal_pos: 50.0,
            font_scale: 1.0,
        }
    }
}

impl TextOverlaySpec {
    /// Smallest accepted font scale.
    pub const MIN_FONT_SCALE: f64 = 0.5;
    /// Largest accepted font scale.
    pub const MAX_FONT_SCALE: f64 = 2.0;

    /// Overlay with `text` and every other field at its default.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// True when nothing will be drawn.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check ranges; every render validates before touching pixels.
    pub fn validate(&self) -> PostcraftResult<()> {
        check_percent("verticalPos", self.vertical_pos)?;
        check_percent("horizontalPos", self.horizontal_pos)?;
        if !self.font_scale.is_finite()
            || !(Self::MIN_FONT_SCALE..=Self::MAX_FONT_SCALE).contains(&self.font_scale)
        {
            return Err(PostcraftError::validation(format!(
                "fontScale {} must be within [{}, {}]",
                self.font_scale,
                Self::MIN_FONT_SCALE,
                Self::MAX_FONT_SCALE
            )));
        }
        Ok(())
    }
}

fn check_percent(name: &str, v: f64) -> PostcraftResult<()> {
    if !v.is_finite() || !(0.0..=100.0).contains(&v) {
        return Err(PostcraftError::validation(format!(
            "{name} {v} must be within [0, 100]"
        )));
    }
    Ok(())
}

/// Encoded raster plus a pixel view of it.
///
/// For normalized uploads `pixels` is the decode of `jpeg`, so the compositor
/// sees the same artifacts a consumer of the stored bytes would. For exports it
/// is the raster that was encoded.
#[derive(Clone, Debug)]
pub(crate) struct EncodedRaster {
    /// Width in pixels (> 0).
    pub width: u32,
    /// Height in pixels (> 0).
    pub height: u32,
    /// JPEG quality (percent) used for `jpeg`.
    pub quality: u8,
    /// Encoded JPEG bytes.
    pub jpeg: Vec<u8>,
    /// Straight RGBA8, row-major, tightly packed, alpha always 255.
    pub pixels: image::RgbaImage,
}

/// Decoded, dimension-capped, re-encoded working copy of an upload.
#[derive(Clone, Debug)]
pub struct NormalizedImage(pub(crate) EncodedRaster);

/// Flattened export of filter plus text overlay.
#[derive(Clone, Debug)]
pub struct CompositionResult(pub(crate) EncodedRaster);

impl NormalizedImage {
    /// Restore a previously stored normalized JPEG.
    pub fn from_jpeg(bytes: Vec<u8>) -> PostcraftResult<Self> {
        let raster = crate::assets::decode::decode_jpeg_raster(bytes, INGEST_JPEG_QUALITY)?;
        if raster.width.max(raster.height) > MAX_DIMENSION {
            return Err(PostcraftError::validation(format!(
                "stored image {}x{} exceeds the {MAX_DIMENSION}px bound",
                raster.width, raster.height
            )));
        }
        Ok(Self(raster))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.0.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.0.height
    }

    /// JPEG quality (percent) of the stored bytes.
    pub fn quality(&self) -> u8 {
        self.0.quality
    }

    /// Encoded JPEG bytes.
    pub fn jpeg(&self) -> &[u8] {
        &self.0.jpeg
    }

    /// Decoded pixels of [`NormalizedImage::jpeg`].
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.0.pixels
    }

    /// Give up the encoded bytes.
    pub fn into_jpeg(self) -> Vec<u8> {
        self.0.jpeg
    }
}

impl CompositionResult {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.0.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.0.height
    }

    /// JPEG quality (percent) of the output.
    pub fn quality(&self) -> u8 {
        self.0.quality
    }

    /// Encoded JPEG bytes.
    pub fn jpeg(&self) -> &[u8] {
        &self.0.jpeg
    }

    /// Composited pixels before JPEG encoding.
    pub fn pixels(&self) -> &image::RgbaImage {
        &self.0.pixels
    }

    /// Suggested file name for the download.
    pub fn file_name(&self) -> &'static str {
        EXPORT_FILE_NAME
    }

    /// Give up the encoded bytes.
    pub fn into_jpeg(self) -> Vec<u8> {
        self.0.jpeg
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
