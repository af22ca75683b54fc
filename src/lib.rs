//! The Homebrew Channel banner sequence as a library.
//!
//! A fixed-tick timeline drives a one-time intro followed by an endlessly repeated loop window.
//! Every tick the banner resolves its static tables (waves, title card, procedurally generated
//! bubbles) into ordered draw commands, which a [`DrawTarget`] rasterizes.
//!
//! # Pipeline overview
//!
//! 1. **Generate** (once): `GeneratorOpts + Rng -> BannerScene` (bubble table with seam copies)
//! 2. **Tick**: `Timeline` advances the frame counter and fires the intro/music cues
//! 3. **Resolve**: `BannerScene + FrameInputs -> Vec<DrawCommand>` (pure, no state)
//! 4. **Render**: `DrawCommand`s onto a [`DrawTarget`], such as the `vello_cpu` [`CpuBackend`]
//! 5. **Encode** (optional): push frames into a [`FrameSink`] (ffmpeg MP4, PNG sequence)
//!
//! [`OfflineRunner`] ties these together for deterministic fixed-tick runs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Easing curves, oscillators and fade envelopes.
pub mod animation;
pub mod assets;
pub mod audio;
pub mod encode;
pub mod eval;
pub mod particles;
pub mod render;
pub mod scene;
pub mod session;
pub mod timeline;

pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, LoopWindow, Point, Rect, Rgba8Premul, Size, Vec2,
};
pub use crate::foundation::error::{BannerError, BannerResult};

pub use crate::assets::store::{AssetProvider, DirAssets, MemoryAssets, SpriteStore};
pub use crate::audio::player::{AudioStages, ClipPlayer, SampleClock, ScheduledPlayer};
pub use crate::encode::ffmpeg::FfmpegSink;
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::eval::resolver::{DrawCommand, FrameInputs, Layer, resolve_frame};
pub use crate::particles::generator::{BubbleGenerator, GeneratorOpts};
pub use crate::render::backend::{DrawTarget, FrameRGBA};
pub use crate::render::cpu::CpuBackend;
pub use crate::scene::banner::BannerScene;
pub use crate::scene::model::{AnimatedElement, Bubble, BubbleType, SpriteId};
pub use crate::session::banner::{Banner, BannerOpts, InputEvent};
pub use crate::session::offline::{OfflineOpts, OfflineRunner, RunStats};
pub use crate::timeline::controller::{TickReport, Timeline, TimelineOpts};
