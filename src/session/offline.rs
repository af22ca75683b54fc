use std::time::Duration;

use crate::assets::store::{AssetProvider, SpriteStore};
use crate::audio::clip::{MIX_CHANNELS, MIX_SAMPLE_RATE};
use crate::audio::mix::{AudioManifest, mix_manifest, ticks_to_samples, write_mix_to_f32le_file};
use crate::audio::player::{AudioStages, SampleClock, ScheduledPlayer};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{BannerError, BannerResult};
use crate::render::backend::{DrawTarget, FrameRGBA};
use crate::scene::banner::{BannerScene, TICK_RATE};
use crate::session::banner::{Banner, BannerOpts};

/// Options for [`OfflineRunner`].
#[derive(Clone, Debug)]
pub struct OfflineOpts {
    /// Number of ticks to run.
    pub ticks: u64,
    /// Tick rate, also the output frame rate.
    pub fps: Fps,
    /// Start with the debug overlay visible.
    pub debug: bool,
    /// Tick indices during which the debug key is held down; consecutive ticks form one press.
    pub debug_toggles: Vec<u64>,
    /// Load and mix the intro and loop clips.
    pub enable_audio: bool,
}

impl Default for OfflineOpts {
    fn default() -> Self {
        Self {
            ticks: 2160,
            fps: TICK_RATE,
            debug: true,
            debug_toggles: Vec::new(),
            enable_audio: true,
        }
    }
}

impl OfflineOpts {
    /// Check tick count and rate.
    pub fn validate(&self) -> BannerResult<()> {
        if self.ticks == 0 {
            return Err(BannerError::validation("offline run needs at least one tick"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        Ok(())
    }
}

/// Summary of one offline run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Loop wraps observed.
    pub wraps: u64,
    /// Tick index on which the intro cue started.
    pub intro_started_at: Option<u64>,
    /// Tick indices on which the music was (re)started.
    pub music_starts: Vec<u64>,
    /// Counter value after the last tick.
    pub final_frame: FrameIndex,
    /// Audio segments handed to the mixer.
    pub audio_segments: usize,
}

/// Deterministic fixed-tick host: update, draw, push, with audio scheduled on a sample clock.
///
/// Tick `t` runs at sample `t * sample_rate / fps` and at simulated time `t / fps`, which also
/// feeds the overlay's FPS readout; frames are pushed with tick index `t`.
#[derive(Debug)]
pub struct OfflineRunner {
    scene: BannerScene,
    sprites: SpriteStore,
    stages: AudioStages<ScheduledPlayer>,
    opts: OfflineOpts,
}

impl OfflineRunner {
    /// Load sprites and, when enabled, audio clips from `provider`.
    pub fn load(
        provider: &dyn AssetProvider,
        scene: BannerScene,
        opts: OfflineOpts,
    ) -> BannerResult<Self> {
        opts.validate()?;
        let sprites = SpriteStore::load(provider);
        let stages = if opts.enable_audio {
            AudioStages::load(provider, &SampleClock::new())
        } else {
            AudioStages::silent()
        };
        Ok(Self {
            scene,
            sprites,
            stages,
            opts,
        })
    }

    /// Scene being rendered.
    pub fn scene(&self) -> &BannerScene {
        &self.scene
    }

    /// Decoded sprites, for building a backend.
    pub fn sprites(&self) -> &SpriteStore {
        &self.sprites
    }

    /// Run options.
    pub fn opts(&self) -> &OfflineOpts {
        &self.opts
    }

    fn banner(&self, clock: &SampleClock) -> Banner<ScheduledPlayer> {
        Banner::new(
            self.scene.clone(),
            self.stages.rebind(clock),
            BannerOpts {
                debug: self.opts.debug,
                ..BannerOpts::default()
            },
        )
    }

    fn sample_at(&self, tick: u64) -> u64 {
        ticks_to_samples(tick, self.opts.fps, MIX_SAMPLE_RATE)
    }

    fn step(
        &self,
        banner: &mut Banner<ScheduledPlayer>,
        clock: &SampleClock,
        tick: u64,
        stats: &mut RunStats,
    ) {
        clock.seek(self.sample_at(tick));
        banner.key_state(self.opts.debug_toggles.contains(&tick));
        let now = Duration::from_secs_f64(self.opts.fps.frames_to_secs(tick));
        let report = banner.update_at(now);
        stats.ticks += 1;
        if report.wrapped {
            stats.wraps += 1;
        }
        if report.intro_started_now {
            stats.intro_started_at = Some(tick);
        }
        if report.music_started_now {
            stats.music_starts.push(tick);
        }
        stats.final_frame = report.frame;
    }

    /// Dry-run the timeline and place every audio start; `None` when no clip is loaded.
    pub fn plan_audio(&self) -> Option<AudioManifest> {
        if self.stages.is_silent() {
            return None;
        }
        let clock = SampleClock::new();
        let mut banner = self.banner(&clock);
        let mut stats = RunStats::default();
        for tick in 0..self.opts.ticks {
            self.step(&mut banner, &clock, tick, &mut stats);
        }
        let total_samples = self.sample_at(self.opts.ticks);
        Some(AudioManifest {
            sample_rate: MIX_SAMPLE_RATE,
            channels: MIX_CHANNELS,
            total_samples,
            segments: banner.stages().segments_until(total_samples),
        })
    }

    /// Run every tick, drawing onto `target` and pushing each frame into `sink`.
    #[tracing::instrument(skip_all, fields(ticks = self.opts.ticks))]
    pub fn render(
        &self,
        target: &mut dyn DrawTarget,
        sink: &mut dyn FrameSink,
    ) -> BannerResult<RunStats> {
        let mut audio_tmp = TempFileGuard(None);
        let manifest = self.plan_audio();
        let audio_segments = manifest.as_ref().map_or(0, |m| m.segments.len());
        let audio = match manifest {
            Some(m) if !m.segments.is_empty() => {
                let mixed = mix_manifest(&m);
                let path = std::env::temp_dir().join(format!(
                    "hbc_banner_mix_{}_{}.f32le",
                    std::process::id(),
                    std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_nanos())
                        .unwrap_or(0)
                ));
                write_mix_to_f32le_file(&mixed, &path)?;
                audio_tmp.0 = Some(path.clone());
                Some(AudioInputConfig {
                    path,
                    sample_rate: m.sample_rate,
                    channels: m.channels,
                })
            }
            _ => None,
        };

        sink.begin(SinkConfig {
            width: self.scene.canvas.width,
            height: self.scene.canvas.height,
            fps: self.opts.fps,
            audio,
        })?;

        let clock = SampleClock::new();
        let mut banner = self.banner(&clock);
        let mut stats = RunStats {
            audio_segments,
            ..RunStats::default()
        };
        for tick in 0..self.opts.ticks {
            self.step(&mut banner, &clock, tick, &mut stats);
            banner.draw(target)?;
            let frame = target.finish()?;
            sink.push_frame(FrameIndex(tick), &frame)?;
        }
        sink.end()?;
        drop(audio_tmp);

        tracing::info!(
            ticks = stats.ticks,
            wraps = stats.wraps,
            final_frame = stats.final_frame.0,
            "offline run finished"
        );
        Ok(stats)
    }

    /// Frame pushed at tick index `tick`, without a sink.
    #[tracing::instrument(skip(self, target))]
    pub fn render_still(&self, tick: u64, target: &mut dyn DrawTarget) -> BannerResult<FrameRGBA> {
        let clock = SampleClock::new();
        let mut banner = self.banner(&clock);
        let mut stats = RunStats::default();
        for t in 0..=tick {
            self.step(&mut banner, &clock, t, &mut stats);
        }
        banner.draw(target)?;
        target.finish()
    }
}

struct TempFileGuard(Option<std::path::PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/offline.rs"]
mod tests;
