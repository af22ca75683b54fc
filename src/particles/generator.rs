use std::ops::Range;

use rand::Rng;

use crate::foundation::core::LoopWindow;
use crate::foundation::error::{BannerError, BannerResult};
use crate::scene::banner::{CANVAS, LOOP_WINDOW};
use crate::scene::model::{Bubble, BubbleType};

/// Bubble generation parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorOpts {
    /// Loop window every bubble must complete within.
    pub window: LoopWindow,
    /// Frame at which the initial cluster spawns.
    pub burst_frame: u64,
    /// Number of bubbles spawned exactly on `burst_frame`.
    pub burst_count: usize,
    /// Number of bubbles spawned uniformly over `[burst_frame, window.end)`.
    pub scatter_count: usize,
    /// Horizontal spawn band relative to the canvas centre. Wider than the canvas.
    pub x_band: Range<f64>,
    /// Lifetime range in frames; the draw is truncated to whole frames.
    pub lifetime: Range<f64>,
    /// Spawn height.
    pub start_y: f64,
    /// Height reached at the end of life.
    pub end_y: f64,
}

impl Default for GeneratorOpts {
    fn default() -> Self {
        let half = CANVAS.center_x() + 64.0;
        Self {
            window: LOOP_WINDOW,
            burst_frame: 250,
            burst_count: 100,
            scatter_count: 280,
            x_band: -half..half,
            lifetime: 50.0..230.0,
            start_y: f64::from(CANVAS.width),
            end_y: 170.0,
        }
    }
}

impl GeneratorOpts {
    /// Check ranges and frame bounds.
    pub fn validate(&self) -> BannerResult<()> {
        self.window.validate()?;
        if self.burst_frame >= self.window.end.0 {
            return Err(BannerError::validation(
                "burst frame must come before the loop end",
            ));
        }
        if !(self.lifetime.start >= 1.0 && self.lifetime.start < self.lifetime.end) {
            return Err(BannerError::validation(
                "bubble lifetime range must be non-empty and at least one frame",
            ));
        }
        if !(self.x_band.start < self.x_band.end) {
            return Err(BannerError::validation("x spawn band must be non-empty"));
        }
        Ok(())
    }
}

/// Produces the bubble table for one run.
#[derive(Debug)]
pub struct BubbleGenerator<'a> {
    types: &'a [BubbleType],
    opts: GeneratorOpts,
}

impl<'a> BubbleGenerator<'a> {
    /// Validate `opts` and the type table.
    pub fn new(types: &'a [BubbleType], opts: GeneratorOpts) -> BannerResult<Self> {
        opts.validate()?;
        if types.is_empty() {
            return Err(BannerError::validation("bubble type table is empty"));
        }
        if types.iter().any(|t| !t.chance.is_finite() || t.chance < 0.0) {
            return Err(BannerError::validation(
                "bubble chances must be finite and >= 0",
            ));
        }
        if types.iter().map(|t| t.chance).sum::<f64>() <= 0.0 {
            return Err(BannerError::validation("bubble chances must not all be zero"));
        }
        Ok(Self { types, opts })
    }

    /// Options in use.
    pub fn opts(&self) -> &GeneratorOpts {
        &self.opts
    }

    /// Generate the full table: burst, scatter, loop filter, then seam copies.
    #[tracing::instrument(skip_all, fields(burst = self.opts.burst_count, scatter = self.opts.scatter_count))]
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Bubble> {
        let o = &self.opts;
        let mut bubbles = Vec::with_capacity(o.burst_count + o.scatter_count);

        for _ in 0..o.burst_count {
            bubbles.push(self.spawn(o.burst_frame, rng));
        }
        for _ in 0..o.scatter_count {
            let start = rng.random_range(o.burst_frame..o.window.end.0);
            bubbles.push(self.spawn(start, rng));
        }

        let dropped = retain_within_loop(&mut bubbles, o.window);
        let copies = wrap_loop_seam(&mut bubbles, o.window);
        tracing::debug!(
            kept = bubbles.len() - copies,
            dropped,
            seam_copies = copies,
            "generated bubble table"
        );
        bubbles
    }

    /// Spawn one bubble starting at `start`.
    pub fn spawn<R: Rng>(&self, start: u64, rng: &mut R) -> Bubble {
        let o = &self.opts;
        let type_index = choose_type(self.types, rng);
        let x = rng.random_range(o.x_band.clone());
        let length = rng.random_range(o.lifetime.clone()) as u64;
        let rotation = rng.random_range(0.0..std::f64::consts::TAU);
        Bubble {
            type_index,
            x,
            start_y: o.start_y,
            end_y: o.end_y,
            start,
            end: start + length,
            length,
            rotation,
            scale: 1.0,
            seam_copy: false,
        }
    }
}

/// Weighted type selection with a uniform draw in `[0, 1)`.
pub fn choose_type<R: Rng>(types: &[BubbleType], rng: &mut R) -> usize {
    pick_weighted(types, rng.random::<f64>())
}

/// Cumulative-sum pick for a unit draw `u`.
///
/// Falls back to the last type when `u` lands at or past the cumulative sum of the others.
pub fn pick_weighted(types: &[BubbleType], u: f64) -> usize {
    let total: f64 = types.iter().map(|t| t.chance).sum();
    let mut opt = u * total;
    for (i, t) in types.iter().enumerate() {
        if t.chance > opt {
            return i;
        }
        opt -= t.chance;
    }
    types.len().saturating_sub(1)
}

/// Drop bubbles that would outlive the loop end. Returns the number removed.
pub fn retain_within_loop(bubbles: &mut Vec<Bubble>, window: LoopWindow) -> usize {
    let before = bubbles.len();
    bubbles.retain(|b| b.end <= window.end.0);
    before - bubbles.len()
}

/// Append a shifted copy of every bubble straddling the loop start.
///
/// Copies are moved one loop length later so the motion carries across the wrap.
/// Returns the number of copies appended.
pub fn wrap_loop_seam(bubbles: &mut Vec<Bubble>, window: LoopWindow) -> usize {
    let shift = window.len_frames();
    let copies: Vec<Bubble> = bubbles
        .iter()
        .filter(|b| !b.seam_copy && window.straddles_start(b.start, b.end))
        .map(|b| b.shifted_later(shift))
        .collect();
    let n = copies.len();
    bubbles.extend(copies);
    n
}

#[cfg(test)]
#[path = "../../tests/unit/particles/generator.rs"]
mod tests;
