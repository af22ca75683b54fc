use crate::foundation::error::{BannerError, BannerResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Value of the banner frame counter.
///
/// Unlike a tick index, the frame counter wraps from the loop end back to the loop start.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Frame value as `f64`, for animation math.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Steady-state loop window `[start, end)` replayed after the one-time intro.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoopWindow {
    /// First frame of the replayed section.
    pub start: FrameIndex,
    /// Frame at which the counter jumps back to `start` (exclusive).
    pub end: FrameIndex,
}

impl LoopWindow {
    /// Reject windows that do not satisfy `start < end`.
    pub fn validate(self) -> BannerResult<()> {
        if self.start.0 >= self.end.0 {
            return Err(BannerError::validation(format!(
                "loop window start {} must be before its end {}",
                self.start.0, self.end.0
            )));
        }
        Ok(())
    }

    /// Number of frames replayed per loop.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Return `true` when the half-open span `[start, end)` crosses the loop start.
    pub fn straddles_start(self, start: u64, end: u64) -> bool {
        start < self.start.0 && end > self.start.0
    }

    /// Map a counter that reached the loop end back to the loop start.
    pub fn wrap(self, f: FrameIndex) -> FrameIndex {
        if f.0 >= self.end.0 { self.start } else { f }
    }
}

/// Ticks-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (ticks).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated rate.
    pub fn new(num: u32, den: u32) -> BannerResult<Self> {
        if den == 0 {
            return Err(BannerError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(BannerError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point ticks per second.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert a tick count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Convert seconds to a tick count using floor semantics.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Logical canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Horizontal centre, the origin of bubble and wave x offsets.
    pub fn center_x(self) -> f64 {
        f64::from(self.width) / 2.0
    }

    /// Full canvas size.
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Opaque white, the banner background.
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Opaque colour; premultiplication is the identity.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
