//! CSS approximation of an export for live UI feedback.

pub mod css;
