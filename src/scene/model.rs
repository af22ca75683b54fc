use crate::animation::motion::AxisMotion;
use crate::foundation::core::{FrameIndex, Vec2};

/// Logical sprite identifiers.
///
/// Each sprite resolves to `<name>.png` under the image asset directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteId {
    /// Channel title artwork.
    BannerTitle,
    /// Flat white sheet, used as backdrop and for the boom flash.
    White,
    /// Back wave band.
    BannerWaveA,
    /// Second back wave band.
    BannerWaveB,
    /// Short front wave.
    BannerWave1A,
    /// Long front wave.
    BannerWave1B,
    /// Foreground swoosh.
    BannerShape2,
    /// Soft gradient rising behind the waves.
    BannerFade,
    /// Bubble variant.
    ABubble1,
    /// Bubble variant.
    ABubble2,
    /// Bubble variant.
    ABubble3,
    /// Bubble variant.
    ABubble4,
    /// Bubble variant.
    ABubble5,
    /// Bubble variant.
    ABubble6,
    /// Bubble variant.
    BBubble1,
    /// Bubble variant.
    CBubble1,
    /// Bubble variant.
    CBubble2,
}

impl SpriteId {
    /// Every sprite, in index order.
    pub const ALL: [SpriteId; 17] = [
        Self::BannerTitle,
        Self::White,
        Self::BannerWaveA,
        Self::BannerWaveB,
        Self::BannerWave1A,
        Self::BannerWave1B,
        Self::BannerShape2,
        Self::BannerFade,
        Self::ABubble1,
        Self::ABubble2,
        Self::ABubble3,
        Self::ABubble4,
        Self::ABubble5,
        Self::ABubble6,
        Self::BBubble1,
        Self::CBubble1,
        Self::CBubble2,
    ];

    /// Dense index into [`SpriteId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Asset name without extension.
    pub fn name(self) -> &'static str {
        match self {
            Self::BannerTitle => "banner_title",
            Self::White => "white",
            Self::BannerWaveA => "banner_wavea",
            Self::BannerWaveB => "banner_waveb",
            Self::BannerWave1A => "banner_wave1a",
            Self::BannerWave1B => "banner_wave1b",
            Self::BannerShape2 => "banner_shape2",
            Self::BannerFade => "banner_fade",
            Self::ABubble1 => "abubble1",
            Self::ABubble2 => "abubble2",
            Self::ABubble3 => "abubble3",
            Self::ABubble4 => "abubble4",
            Self::ABubble5 => "abubble5",
            Self::ABubble6 => "abubble6",
            Self::BBubble1 => "bbubble1",
            Self::CBubble1 => "cbubble1",
            Self::CBubble2 => "cbubble2",
        }
    }

    /// Asset file name, `<name>.png`.
    pub fn file_name(self) -> String {
        format!("{}.png", self.name())
    }
}

impl std::fmt::Display for SpriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl serde::Serialize for SpriteId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One kind of bubble sprite with its selection weight.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BubbleType {
    /// Sprite drawn for this type.
    pub sprite: SpriteId,
    /// Sprite width in pixels.
    pub width: f64,
    /// Sprite height in pixels.
    pub height: f64,
    /// Relative selection weight, `>= 0`.
    pub chance: f64,
}

/// A single rising bubble.
///
/// Lives over `[start, end)` with `end = start + length`. `x` is relative to the canvas
/// centre and fixed for life; `y` is interpolated from `start_y` to `end_y`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Bubble {
    /// Index into the scene's bubble type table.
    pub type_index: usize,
    /// Horizontal offset from the canvas centre.
    pub x: f64,
    /// Vertical position at spawn.
    pub start_y: f64,
    /// Vertical position at the end of life.
    pub end_y: f64,
    /// First frame on which the bubble is active.
    pub start: u64,
    /// First frame on which the bubble is no longer active.
    pub end: u64,
    /// Lifetime in frames, `> 0`.
    pub length: u64,
    /// Initial rotation in radians.
    pub rotation: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Set on the shifted duplicate that covers the loop seam.
    pub seam_copy: bool,
}

/// Instantaneous state of an active bubble.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubblePose {
    /// Lifetime progress in `[0, 1)`.
    pub progress: f64,
    /// Interpolated vertical position.
    pub y: f64,
    /// Rotation in radians, turning half a revolution over the lifetime.
    pub rotation: f64,
}

impl Bubble {
    /// Return `true` when the bubble is active on `frame`.
    pub fn active_at(&self, frame: FrameIndex) -> bool {
        self.start <= frame.0 && frame.0 < self.end
    }

    /// Pose on `frame`, or `None` while inactive.
    pub fn pose_at(&self, frame: FrameIndex) -> Option<BubblePose> {
        if !self.active_at(frame) {
            return None;
        }
        let progress = (frame.0 - self.start) as f64 / self.length as f64;
        Some(BubblePose {
            progress,
            y: self.start_y + (self.end_y - self.start_y) * progress,
            rotation: self.rotation + progress * std::f64::consts::PI,
        })
    }

    /// Duplicate moved `delta` frames later, flagged as a seam copy.
    pub fn shifted_later(&self, delta: u64) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
            seam_copy: true,
            ..*self
        }
    }
}

/// Decorative sprite that drifts on sine oscillators.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AnimatedElement {
    /// Sprite drawn for this element.
    pub sprite: SpriteId,
    /// Sprite width in pixels.
    pub width: f64,
    /// Sprite height in pixels.
    pub height: f64,
    /// Base offset: x from the canvas centre, y below the wave baseline.
    pub base: Vec2,
    /// Horizontal motion.
    pub motion_x: AxisMotion,
    /// Vertical motion.
    pub motion_y: AxisMotion,
    /// Constant rotation in radians; `0` leaves the sprite unrotated.
    pub rotation: f64,
    /// Uniform scale; `0` and `1` both mean unscaled.
    pub scale: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
