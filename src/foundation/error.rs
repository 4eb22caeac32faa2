/// Convenience result type used across posterkit.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// Invalid user-provided or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image or font bytes that could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors raised while rasterizing a layer.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PosterError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PosterError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Message without the category prefix, suitable for showing to an end user.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(m) | Self::Decode(m) | Self::Render(m) | Self::Serde(m) => m.clone(),
            Self::Other(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
