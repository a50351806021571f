/// Convenience result type used across the overlay.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Top-level error taxonomy used by the overlay's fallible boundaries.
///
/// Per-frame rendering never surfaces these to the host: a failed layer is skipped and retried on
/// the next frame. They show up when loading settings, decoding images or reading back frames.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Procedural bitmap synthesis or texture allocation failed.
    #[error("texture error: {0}")]
    Texture(String),

    /// Custom image could not be located or decoded.
    #[error("image error: {0}")]
    Image(String),

    /// Graphics backend rejected an operation.
    #[error("backend error: {0}")]
    Backend(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Build a [`OverlayError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`OverlayError::Texture`] value.
    pub fn texture(msg: impl Into<String>) -> Self {
        Self::Texture(msg.into())
    }

    /// Build a [`OverlayError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`OverlayError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
