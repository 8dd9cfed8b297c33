//! Upload normalization.

pub mod normalize;
