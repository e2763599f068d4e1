/// Convenience result type used across reelforge.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Only [`ReelError::Decode`] is recoverable inside a render (the offending image is dropped).
/// Every other variant aborts the render.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Audio, image directory, font or other source asset is absent or unreadable.
    #[error("missing asset: {0}")]
    MissingAsset(String),

    /// Structurally invalid input: no images, non-positive audio duration, bad transcript/config.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A single image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The final mux/encode step failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::MissingAsset`] value.
    pub fn missing_asset(msg: impl Into<String>) -> Self {
        Self::MissingAsset(msg.into())
    }

    /// Build a [`ReelError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`ReelError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ReelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Return `true` when the render may continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
