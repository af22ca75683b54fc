/// Easing functions used to map normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Sine ease-out, `sin(t * pi / 2)`.
    OutSine,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
        }
    }
}

/// Interpolate between `from` and `to` with already-eased progress `p`.
pub fn lerp(from: f64, to: f64, p: f64) -> f64 {
    (to - from) * p + from
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
