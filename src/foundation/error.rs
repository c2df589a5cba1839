/// Convenience result type used across glyphcast.
pub type GlyphResult<T> = Result<T, GlyphError>;

/// Top-level error taxonomy used by the compositing, raster and stream APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlyphError {
    /// Invalid options, palette, or a crop that leaves nothing behind.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed glyph stream: bad delay line, truncated frame body, invalid UTF-8.
    #[error("format error: {0}")]
    Format(String),

    /// Read or write failure on the underlying source or sink.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from source decoders.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphError {
    /// Build a [`GlyphError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GlyphError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Return `true` for stream format errors.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
