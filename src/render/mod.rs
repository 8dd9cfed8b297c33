//! Export rendering.
//!
//! [`compositor::Compositor`] drives the pipeline; [`text`] holds the
//! per-design drawing recipes.

pub mod compositor;
pub mod text;
