use rand::Rng;

use crate::animation::motion::{AxisMotion, Oscillator};
use crate::foundation::core::{Canvas, Fps, FrameIndex, LoopWindow, Vec2};
use crate::foundation::error::BannerResult;
use crate::particles::generator::{BubbleGenerator, GeneratorOpts};
use crate::scene::model::{AnimatedElement, Bubble, BubbleType, SpriteId};

/// Logical render surface.
pub const CANVAS: Canvas = Canvas {
    width: 810,
    height: 456,
};

/// Fixed simulation and presentation rate.
pub const TICK_RATE: Fps = Fps { num: 60, den: 1 };

/// Replayed section of the timeline.
pub const LOOP_WINDOW: LoopWindow = LoopWindow {
    start: FrameIndex(360),
    end: FrameIndex(1260),
};

/// Frames over which the waves and fade rise into place.
pub const REVEAL_FRAMES: f64 = 244.0;
/// Counter value at which the intro cue starts.
pub const INTRO_CUE_FRAME: FrameIndex = FrameIndex(1);
/// Counter value at which the looping music starts.
pub const MUSIC_CUE_FRAME: FrameIndex = FrameIndex(237);
/// First frame of the one-frame title fade-in.
pub const TITLE_FADE_FRAME: FrameIndex = FrameIndex(243);
/// Last frame on which the boom flash can be drawn.
pub const FLASH_LAST_FRAME: FrameIndex = FrameIndex(256);
/// Flash stays fully opaque up to this frame, then fades out.
pub const FLASH_HOLD_FRAME: FrameIndex = FrameIndex(246);
/// Length of the flash fade-out.
pub const FLASH_FADE_FRAMES: f64 = 10.0;

/// Bubble sprites. Every type currently carries the same weight.
pub fn bubble_types() -> Vec<BubbleType> {
    let sq = |sprite, side: f64| BubbleType {
        sprite,
        width: side,
        height: side,
        chance: 1.0,
    };
    vec![
        sq(SpriteId::ABubble1, 48.0),
        sq(SpriteId::ABubble2, 32.0),
        sq(SpriteId::ABubble3, 16.0),
        sq(SpriteId::ABubble4, 24.0),
        sq(SpriteId::ABubble5, 32.0),
        sq(SpriteId::ABubble6, 16.0),
        sq(SpriteId::BBubble1, 48.0),
        sq(SpriteId::CBubble1, 64.0),
        sq(SpriteId::CBubble2, 16.0),
    ]
}

/// Wave and shape decorations, back to front.
pub fn wave_elements() -> Vec<AnimatedElement> {
    let wave = |sprite, w: f64, h: f64, base: (f64, f64), osc_x: (f64, f64), osc_y: (f64, f64)| {
        AnimatedElement {
            sprite,
            width: w,
            height: h,
            base: Vec2::new(base.0, base.1),
            motion_x: AxisMotion::Oscillate(Oscillator {
                speed: osc_x.0,
                range: osc_x.1,
            }),
            motion_y: AxisMotion::Oscillate(Oscillator {
                speed: osc_y.0,
                range: osc_y.1,
            }),
            rotation: 0.0,
            scale: 0.0,
        }
    };
    vec![
        wave(SpriteId::BannerWaveA, 1024.0, 32.0, (-100.0, 10.0), (1.0, 200.0), (6.0, 5.0)),
        wave(SpriteId::BannerWaveB, 1024.0, 32.0, (-100.0, 15.0), (2.0, 200.0), (8.0, 5.0)),
        wave(SpriteId::BannerWave1A, 382.0, 32.0, (-200.0, 40.0), (2.0, 400.0), (1.2, 20.0)),
        wave(SpriteId::BannerWave1B, 527.0, 37.0, (200.0, 50.0), (2.2, 200.0), (1.2, 13.0)),
        wave(SpriteId::BannerWave1B, 527.0, 37.0, (-400.0, 45.0), (2.7, 200.0), (1.2, 20.0)),
        wave(SpriteId::BannerShape2, 644.0, 28.0, (-180.0, 50.0), (1.4, 280.0), (1.2, 5.0)),
    ]
}

/// Immutable per-run scene: tables plus the generated bubble set.
#[derive(Clone, Debug, serde::Serialize)]
pub struct BannerScene {
    /// Render surface.
    pub canvas: Canvas,
    /// Replayed section of the timeline.
    pub window: LoopWindow,
    /// Bubble type table indexed by [`Bubble::type_index`].
    pub bubble_types: Vec<BubbleType>,
    /// Generated bubbles, including seam copies.
    pub bubbles: Vec<Bubble>,
    /// Wave and shape decorations.
    pub waves: Vec<AnimatedElement>,
}

impl BannerScene {
    /// Generate the standard banner scene with a fresh bubble table.
    pub fn generate<R: Rng>(opts: &GeneratorOpts, rng: &mut R) -> BannerResult<Self> {
        let bubble_types = bubble_types();
        let bubbles = BubbleGenerator::new(&bubble_types, opts.clone())?.generate(rng);
        Ok(Self {
            canvas: CANVAS,
            window: opts.window,
            bubble_types,
            bubbles,
            waves: wave_elements(),
        })
    }

    /// Standard tables with a caller-supplied bubble set.
    pub fn with_bubbles(bubbles: Vec<Bubble>) -> Self {
        Self {
            canvas: CANVAS,
            window: LOOP_WINDOW,
            bubble_types: bubble_types(),
            bubbles,
            waves: wave_elements(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/banner.rs"]
mod tests;
