/// Convenience result type used across flipbook.
pub type FlipbookResult<T> = Result<T, FlipbookError>;

/// Top-level error taxonomy for the boundary APIs.
///
/// Navigation and animation never fail: invalid page indices are clamped and
/// missing images degrade to placeholders. Errors only surface when parsing
/// album payloads or loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum FlipbookError {
    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Album payload or album code could not be used.
    #[error("album error: {0}")]
    Album(String),

    /// Configuration values out of range.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlipbookError {
    /// Build a [`FlipbookError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlipbookError::Album`] value.
    pub fn album(msg: impl Into<String>) -> Self {
        Self::Album(msg.into())
    }

    /// Build a [`FlipbookError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FlipbookError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FlipbookError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
