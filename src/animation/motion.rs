/// Sine oscillation normalized to `[0, 1]` and scaled by a pixel range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Oscillator {
    /// Phase speed; the phase advances by `speed` radians every 60 frames.
    pub speed: f64,
    /// Peak-to-peak amplitude in pixels.
    pub range: f64,
}

impl Oscillator {
    const FRAMES_PER_RADIAN: f64 = 60.0;

    /// Normalized value `sin(frame / 60 * speed) * 0.5 + 0.5`.
    pub fn unit(self, frame: f64) -> f64 {
        (frame / Self::FRAMES_PER_RADIAN * self.speed).sin() * 0.5 + 0.5
    }

    /// Offset in pixels, within `[0, range]`.
    pub fn offset(self, frame: f64) -> f64 {
        self.unit(frame) * self.range
    }
}

/// Motion of one axis of an animated element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AxisMotion {
    /// Stays at its base position.
    Fixed,
    /// Oscillates around its base position.
    Oscillate(Oscillator),
}

impl AxisMotion {
    /// Offset added to the base position at `frame`.
    pub fn offset(self, frame: f64) -> f64 {
        match self {
            Self::Fixed => 0.0,
            Self::Oscillate(osc) => osc.offset(frame),
        }
    }
}

/// Piecewise-linear alpha over normalized lifetime progress.
///
/// Ramps up over `[0, fade_in_end)`, holds at 1, then ramps down after `fade_out_start`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FadeEnvelope {
    /// Progress at which the fade-in completes.
    pub fade_in_end: f64,
    /// Progress after which the fade-out begins.
    pub fade_out_start: f64,
}

impl FadeEnvelope {
    /// Envelope used by bubbles: in over the first 10%, out over the last 30%.
    pub const BUBBLE: Self = Self {
        fade_in_end: 0.1,
        fade_out_start: 0.7,
    };

    /// Alpha in `[0, 1]` at `progress`.
    pub fn alpha(self, progress: f64) -> f64 {
        let a = if progress < self.fade_in_end {
            progress / self.fade_in_end
        } else if progress > self.fade_out_start {
            1.0 - (progress - self.fade_out_start) / (1.0 - self.fade_out_start)
        } else {
            1.0
        };
        a.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion.rs"]
mod tests;
