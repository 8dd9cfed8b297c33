/// Convenience result type used across Postcraft.
pub type PostcraftResult<T> = Result<T, PostcraftError>;

/// Top-level error taxonomy used by the ingestion and compositing APIs.
///
/// Every failure is deterministic for a given input; nothing here is retried.
#[derive(thiserror::Error, Debug)]
pub enum PostcraftError {
    /// Raw bytes could not be interpreted as a supported raster image.
    #[error("decode error: {0}")]
    Decode(String),

    /// A raster could not be serialized to the output format.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid caller-provided values (overlay ranges, colours, dimensions).
    #[error("validation error: {0}")]
    Validation(String),

    /// Font bytes were unusable or a design has no face to draw with.
    #[error("font error: {0}")]
    Font(String),

    /// Configuration file or environment problems.
    #[error("config error: {0}")]
    Config(String),
}

impl PostcraftError {
    /// Build a [`PostcraftError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PostcraftError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PostcraftError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PostcraftError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`PostcraftError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures caused by the input bytes themselves.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
