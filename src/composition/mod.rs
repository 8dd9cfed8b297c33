//! Value types passed between ingestion and the compositor.

pub mod model;
