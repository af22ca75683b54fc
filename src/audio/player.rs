use std::cell::Cell;
use std::rc::Rc;

use crate::assets::store::AssetProvider;
use crate::audio::clip::AudioClip;
use crate::audio::mix::AudioSegment;

/// Minimal playback handle the timeline drives.
pub trait ClipPlayer {
    /// Start playback from the beginning of the clip.
    fn play(&mut self);
    /// Return `true` while audio is audible.
    fn is_playing(&self) -> bool;
}

/// How a clip behaves when it reaches its end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    /// Stop at the end of the clip.
    Once,
    /// Restart seamlessly from the beginning.
    Looped,
}

/// Output position in sample frames, shared between the host and its players.
#[derive(Clone, Debug, Default)]
pub struct SampleClock(Rc<Cell<u64>>);

impl SampleClock {
    /// Clock at sample 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current output sample frame.
    pub fn now(&self) -> u64 {
        self.0.get()
    }

    /// Move the clock to `sample`.
    pub fn seek(&self, sample: u64) {
        self.0.set(sample);
    }
}

/// Player that records when it was started against a [`SampleClock`].
///
/// Nothing is audible while the run is in progress; the recorded starts are turned into
/// mix segments afterwards with [`ScheduledPlayer::segments_until`].
#[derive(Clone, Debug)]
pub struct ScheduledPlayer {
    clip: AudioClip,
    playback: Playback,
    clock: SampleClock,
    volume: f32,
    starts: Vec<u64>,
}

impl ScheduledPlayer {
    /// Create a stopped player.
    pub fn new(clip: AudioClip, playback: Playback, clock: SampleClock) -> Self {
        Self {
            clip,
            playback,
            clock,
            volume: 1.0,
            starts: Vec::new(),
        }
    }

    /// Stopped copy of this player driven by `clock`, with no recorded starts.
    pub fn rebind(&self, clock: &SampleClock) -> Self {
        Self {
            clip: self.clip.clone(),
            playback: self.playback,
            clock: clock.clone(),
            volume: self.volume,
            starts: Vec::new(),
        }
    }

    /// Clip played by this handle.
    pub fn clip(&self) -> &AudioClip {
        &self.clip
    }

    /// Sample frames at which `play` was called, in order.
    pub fn starts(&self) -> &[u64] {
        &self.starts
    }

    /// Placed segments up to `end_sample`.
    ///
    /// A later start cuts the previous playback short. Looped playback repeats the clip
    /// back to back until the next start or `end_sample`.
    pub fn segments_until(&self, end_sample: u64) -> Vec<AudioSegment> {
        let len = self.clip.len_frames();
        if len == 0 {
            return Vec::new();
        }

        let mut out = Vec::new();
        for (i, &start) in self.starts.iter().enumerate() {
            let stop = self
                .starts
                .get(i + 1)
                .copied()
                .unwrap_or(u64::MAX)
                .min(end_sample);
            let mut at = start;
            while at < stop {
                out.push(AudioSegment {
                    timeline_start_sample: at,
                    timeline_end_sample: (at + len).min(stop),
                    volume: self.volume,
                    source_channels: self.clip.channels,
                    source: self.clip.interleaved_f32.clone(),
                });
                if self.playback == Playback::Once {
                    break;
                }
                at += len;
            }
        }
        out
    }
}

impl ClipPlayer for ScheduledPlayer {
    fn play(&mut self) {
        self.starts.push(self.clock.now());
    }

    fn is_playing(&self) -> bool {
        let Some(&last) = self.starts.last() else {
            return false;
        };
        match self.playback {
            Playback::Looped => !self.clip.is_empty(),
            Playback::Once => self.clock.now() < last + self.clip.len_frames(),
        }
    }
}

/// Intro and music stages. Either may be absent when its clip failed to load.
#[derive(Clone, Debug)]
pub struct AudioStages<P> {
    /// One-shot intro sting.
    pub intro: Option<P>,
    /// Looping background music.
    pub music: Option<P>,
}

impl<P> AudioStages<P> {
    /// No audio at all.
    pub fn silent() -> Self {
        Self {
            intro: None,
            music: None,
        }
    }
}

impl AudioStages<ScheduledPlayer> {
    /// Load both cues from `provider`; a failed cue is logged and left unset.
    pub fn load(provider: &dyn AssetProvider, clock: &SampleClock) -> Self {
        use crate::audio::clip::AudioCue;

        let load = |cue: AudioCue, playback| match provider.load_clip(cue) {
            Ok(clip) => {
                tracing::info!(cue = cue.file_name(), frames = clip.len_frames(), "loaded audio clip");
                Some(ScheduledPlayer::new(clip, playback, clock.clone()))
            }
            Err(e) => {
                tracing::warn!(cue = cue.file_name(), error = %e, "audio clip unavailable, stage disabled");
                None
            }
        };
        Self {
            intro: load(AudioCue::Intro, Playback::Once),
            music: load(AudioCue::Loop, Playback::Looped),
        }
    }

    /// Stopped copies of both stages driven by `clock`.
    pub fn rebind(&self, clock: &SampleClock) -> Self {
        Self {
            intro: self.intro.as_ref().map(|p| p.rebind(clock)),
            music: self.music.as_ref().map(|p| p.rebind(clock)),
        }
    }

    /// Whether neither stage could be loaded.
    pub fn is_silent(&self) -> bool {
        self.intro.is_none() && self.music.is_none()
    }

    /// Every placed segment from both stages, up to `end_sample`.
    pub fn segments_until(&self, end_sample: u64) -> Vec<AudioSegment> {
        self.intro
            .iter()
            .chain(self.music.iter())
            .flat_map(|p| p.segments_until(end_sample))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/player.rs"]
mod tests;
