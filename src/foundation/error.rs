/// Convenience result type used across the banner engine and host.
pub type BannerResult<T> = Result<T, BannerError>;

/// Top-level error taxonomy.
///
/// `Asset` and `Audio` failures are recoverable at startup: callers substitute a placeholder
/// sprite or leave the audio stage unset. The remaining classes are fatal for a run.
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    /// Invalid options or inconsistent tables.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image missing or undecodable.
    #[error("asset error: {0}")]
    Asset(String),

    /// Audio clip missing, undecodable, or unplayable.
    #[error("audio error: {0}")]
    Audio(String),

    /// Rasterizer failures.
    #[error("render error: {0}")]
    Render(String),

    /// Frame sink failures (ffmpeg, PNG output).
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BannerError {
    /// Build a [`BannerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BannerError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`BannerError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`BannerError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BannerError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
