//! Raster decode/encode and font handling.

pub mod decode;
pub mod encode;
pub mod fonts;
pub mod text;
