use std::path::Path;
use std::sync::Arc;

use crate::encode::ffmpeg::{ffmpeg_command, stderr_text};
use crate::foundation::error::{BannerError, BannerResult};

/// Sample rate of the output mix and of every decoded clip.
pub const MIX_SAMPLE_RATE: u32 = 44_100;
/// Channel count of the output mix and of every decoded clip.
pub const MIX_CHANNELS: u16 = 2;

/// The two audio stages of the banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// One-shot intro sting.
    Intro,
    /// Looping background music.
    Loop,
}

impl AudioCue {
    /// Asset file name under the audio directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Intro => "intro.wav",
            Self::Loop => "loop.wav",
        }
    }
}

/// Interleaved `f32` PCM.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Interleaved samples, shared between players and mix segments.
    pub interleaved_f32: Arc<Vec<f32>>,
}

impl AudioClip {
    /// Wrap interleaved samples; the length must be a whole number of frames.
    pub fn from_interleaved(
        sample_rate: u32,
        channels: u16,
        interleaved_f32: Vec<f32>,
    ) -> BannerResult<Self> {
        if sample_rate == 0 || channels == 0 {
            return Err(BannerError::audio(
                "clip sample rate and channel count must be > 0",
            ));
        }
        if !interleaved_f32.len().is_multiple_of(usize::from(channels)) {
            return Err(BannerError::audio(
                "clip sample count is not a multiple of its channel count",
            ));
        }
        Ok(Self {
            sample_rate,
            channels,
            interleaved_f32: Arc::new(interleaved_f32),
        })
    }

    /// Length in sample frames.
    pub fn len_frames(&self) -> u64 {
        (self.interleaved_f32.len() / usize::from(self.channels)) as u64
    }

    /// Return `true` when the clip has no samples.
    pub fn is_empty(&self) -> bool {
        self.interleaved_f32.is_empty()
    }
}

/// Decode an audio file to stereo `f32` at `sample_rate` by shelling out to `ffmpeg`.
pub fn decode_clip_file(path: &Path, sample_rate: u32) -> BannerResult<AudioClip> {
    if !path.exists() {
        return Err(BannerError::audio(format!(
            "audio file '{}' not found",
            path.display()
        )));
    }

    let out = ffmpeg_command()
        .arg("-i")
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            &MIX_CHANNELS.to_string(),
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| BannerError::audio(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        return Err(BannerError::audio(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            stderr_text(&out.stderr)
        )));
    }

    AudioClip::from_interleaved(sample_rate, MIX_CHANNELS, parse_f32le(&out.stdout)?)
}

/// Parse raw little-endian `f32` samples.
pub fn parse_f32le(bytes: &[u8]) -> BannerResult<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return Err(BannerError::audio(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/audio/clip.rs"]
mod tests;
