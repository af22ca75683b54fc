use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig, check_order};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BannerError, BannerResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::backend::FrameRGBA;

/// Write one frame as an opaque PNG, flattening alpha over `bg_rgba`.
pub fn write_png(path: &Path, frame: &FrameRGBA, bg_rgba: [u8; 4]) -> BannerResult<()> {
    let mut rgba = vec![0u8; frame.data.len()];
    if frame.premultiplied {
        flatten_premul_over_bg(&mut rgba, &frame.data, bg_rgba)?;
    } else {
        rgba.copy_from_slice(&frame.data);
    }
    save_rgba(path, &rgba, frame.width, frame.height)
}

fn save_rgba(path: &Path, rgba: &[u8], width: u32, height: u32) -> BannerResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| BannerError::encode(format!("failed to write '{}': {e}", path.display())))
}

/// Sink writing `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    bg_rgba: [u8; 4],
    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, flattening over opaque white.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            bg_rgba: [255, 255, 255, 255],
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
            written: 0,
        }
    }

    /// Path of the file for tick `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }

    /// Number of frames written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> BannerResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            BannerError::encode(format!(
                "failed to create frame directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        if cfg.audio.is_some() {
            tracing::warn!("png sequence output ignores the soundtrack");
        }
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BannerResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| BannerError::encode("png sink not started"))?;
        check_order(&mut self.last_idx, idx)?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(BannerError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        flatten_premul_over_bg(&mut self.scratch, &frame.data, self.bg_rgba)?;
        let path = self.frame_path(idx);
        save_rgba(&path, &self.scratch, frame.width, frame.height)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> BannerResult<()> {
        tracing::info!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
