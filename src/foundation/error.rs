/// Convenience result type used across the crate.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Top-level error taxonomy used by drawing APIs.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// A color string could not be parsed.
    #[error("color error: {0}")]
    Color(String),

    /// Invalid geometry or sizes handed to the rasterizer.
    #[error("validation error: {0}")]
    Validation(String),

    /// Misuse of the state stack.
    #[error("state error: {0}")]
    State(String),

    /// A browser API entry point this rasterizer deliberately does not provide.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Errors when serializing or deserializing scenes.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    /// Build a [`CanvasError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`CanvasError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CanvasError::State`] value.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Build a [`CanvasError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`CanvasError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
