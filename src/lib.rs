//! Postcraft composes social-media photo posts: an uploaded photo, a colour
//! filter and a block of styled text, flattened into one JPEG.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: `upload bytes -> NormalizedImage` ([`normalize`]). Decode,
//!    cap the long side at [`MAX_DIMENSION`] pixels, re-encode as quality-70 JPEG.
//! 2. **Compose**: `NormalizedImage + FilterSpec + TextOverlaySpec -> CompositionResult`
//!    ([`Compositor::compose`]). Filter the canvas, lay out and draw each line in
//!    its [`Design`], encode as quality-80 JPEG.
//! 3. **Preview** (optional): the same layout expressed as CSS ([`describe`]) for
//!    instant feedback while the user edits.
//!
//! Layout math lives in one pure function, [`plan_overlay`], used by both the
//! exporter and the preview so the two cannot disagree on where text goes.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same inputs and fonts produce the same pixels.
//! - **No global state**: every call takes its configuration explicitly.
//! - **No system fonts**: text is shaped only with the faces in a [`FontBook`].
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod composition;
mod effects;
mod foundation;
mod ingest;
mod layout;
mod preview;
mod render;

pub use assets::decode::{decode_image, detect_format};
pub use assets::encode::encode_jpeg;
pub use assets::fonts::FontBook;
pub use assets::text::{ShapedLine, ShapedRun, TextLayoutEngine};
pub use composition::model::{
    CompositionResult, Design, EXPORT_FILE_NAME, EXPORT_JPEG_QUALITY, FilterSpec, FontFace,
    INGEST_JPEG_QUALITY, MAX_DIMENSION, NormalizedImage, TextOverlaySpec,
};
pub use effects::filter::{apply_filter, apply_filter_in_place};
pub use foundation::config::{
    ENV_FONT_DIR, ENV_RESIZE_FILTER, FontsConfig, IngestConfig, StudioConfig,
};
pub use foundation::core::{Point, Rgb8, Rgba8};
pub use foundation::error::{PostcraftError, PostcraftResult};
pub use ingest::normalize::{ResizeFilter, normalize, normalize_with, target_dimensions};
pub use layout::overlay::{LineSlot, OverlayLayout, plan_overlay, split_lines};
pub use preview::css::{PreviewLine, PreviewOverlay, describe};
pub use render::compositor::{Compositor, compose};
pub use render::text::DropShadow;
