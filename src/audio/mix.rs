use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Fps;
use crate::foundation::error::{BannerError, BannerResult};

/// One placement of clip audio on the output timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioSegment {
    /// First output sample frame (inclusive).
    pub timeline_start_sample: u64,
    /// Last output sample frame (exclusive).
    pub timeline_end_sample: u64,
    /// Linear gain.
    pub volume: f32,
    /// Interleaved channel count of `source`.
    pub source_channels: u16,
    /// Interleaved source samples, already at the output sample rate.
    pub source: Arc<Vec<f32>>,
}

/// Everything needed to render the output mix.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioManifest {
    /// Output sample rate.
    pub sample_rate: u32,
    /// Output channel count.
    pub channels: u16,
    /// Output length in sample frames.
    pub total_samples: u64,
    /// Placed segments; overlapping segments are summed.
    pub segments: Vec<AudioSegment>,
}

/// Mix all manifest segments into interleaved output PCM clamped to `[-1, 1]`.
pub fn mix_manifest(manifest: &AudioManifest) -> Vec<f32> {
    let frames = manifest.total_samples as usize;
    let mut out = vec![0.0f32; frames * usize::from(manifest.channels)];

    for seg in &manifest.segments {
        mix_segment(&mut out, manifest, seg);
    }

    for s in &mut out {
        *s = s.clamp(-1.0, 1.0);
    }
    out
}

fn mix_segment(out: &mut [f32], manifest: &AudioManifest, seg: &AudioSegment) {
    let src_ch = usize::from(seg.source_channels);
    if src_ch == 0 {
        return;
    }
    let src_frames = (seg.source.len() / src_ch) as u64;
    let end = seg
        .timeline_end_sample
        .min(manifest.total_samples)
        .min(seg.timeline_start_sample.saturating_add(src_frames));
    let out_ch = usize::from(manifest.channels);

    for dst in seg.timeline_start_sample..end {
        let i = (dst - seg.timeline_start_sample) as usize * src_ch;
        let (l, r) = if src_ch == 1 {
            (seg.source[i], seg.source[i])
        } else {
            (seg.source[i], seg.source[i + 1])
        };

        let d = dst as usize * out_ch;
        out[d] += l * seg.volume;
        if out_ch > 1 {
            out[d + 1] += r * seg.volume;
        }
    }
}

/// Write interleaved `f32` PCM samples to a raw little-endian `.f32le` file.
pub fn write_mix_to_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> BannerResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            BannerError::audio(format!(
                "failed to create audio mix output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        BannerError::audio(format!(
            "failed to write mixed audio file '{}': {e}",
            out_path.display()
        ))
    })
}

/// Convert a tick count to the nearest sample frame at `sample_rate`.
pub fn ticks_to_samples(ticks: u64, fps: Fps, sample_rate: u32) -> u64 {
    let num = u128::from(ticks) * u128::from(sample_rate) * u128::from(fps.den);
    let den = u128::from(fps.num);
    ((num + (den / 2)) / den) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
