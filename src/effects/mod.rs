//! Pixel-level effects on RGBA8 buffers.

/// Gaussian blur used for shadows and glow.
pub mod blur;
/// Premultiplied source-over compositing.
pub mod composite;
/// Full-canvas colour filters.
pub mod filter;
