use std::path::PathBuf;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{BannerError, BannerResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Optional raw PCM soundtrack.
    pub audio: Option<AudioInputConfig>,
}

/// Raw PCM audio input for sinks that can mux a soundtrack.
#[derive(Debug, Clone)]
pub struct AudioInputConfig {
    /// Path to interleaved `f32le` PCM data.
    pub path: PathBuf,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
}

/// Sink contract for consuming rendered frames.
///
/// `push_frame` is called with strictly increasing tick indices. The tick index is not the
/// banner frame counter, which wraps.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BannerResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BannerResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> BannerResult<()>;
}

/// Reject non-increasing tick indices.
pub(crate) fn check_order(last: &mut Option<FrameIndex>, idx: FrameIndex) -> BannerResult<()> {
    if let Some(prev) = *last
        && idx.0 <= prev.0
    {
        return Err(BannerError::encode(format!(
            "sink received out-of-order tick index {} after {}",
            idx.0, prev.0
        )));
    }
    *last = Some(idx);
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    last_idx: Option<FrameIndex>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BannerResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.last_idx = None;
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BannerResult<()> {
        check_order(&mut self.last_idx, idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BannerResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
