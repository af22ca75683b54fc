use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::audio::player::{AudioStages, ClipPlayer};
use crate::eval::resolver::{DrawCommand, FrameInputs, resolve_into};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::BannerResult;
use crate::render::backend::DrawTarget;
use crate::render::overlay::{OverlayStyle, debug_line, draw_text};
use crate::scene::banner::BannerScene;
use crate::timeline::controller::{TickReport, Timeline, TimelineOpts};

/// Host input understood by the banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The debug key went down.
    ToggleDebug,
}

/// Turns a polled key state into single presses.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyEdge {
    down: bool,
}

impl KeyEdge {
    /// Feed the current key state; returns `true` only on the up-to-down transition.
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.down;
        self.down = down;
        pressed
    }
}

/// Ticks per second, averaged over a sliding window of host-supplied timestamps.
#[derive(Clone, Debug)]
pub struct FpsMeter {
    window: Duration,
    stamps: VecDeque<Duration>,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(1),
            stamps: VecDeque::new(),
        }
    }
}

impl FpsMeter {
    /// Record one tick at `now`, measured from any fixed origin.
    pub fn record(&mut self, now: Duration) {
        self.stamps.push_back(now);
        while let Some(&first) = self.stamps.front() {
            if now.saturating_sub(first) > self.window {
                self.stamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Current rate, `0` until two ticks have been recorded.
    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.stamps.front(), self.stamps.back()) else {
            return 0.0;
        };
        let span = last.saturating_sub(*first).as_secs_f64();
        if span <= 0.0 {
            return 0.0;
        }
        (self.stamps.len() - 1) as f64 / span
    }
}

/// Options for [`Banner`].
#[derive(Clone, Copy, Debug)]
pub struct BannerOpts {
    /// Start with the debug overlay visible.
    pub debug: bool,
    /// Trigger frames and loop bounds.
    pub timeline: TimelineOpts,
    /// Overlay placement and colours.
    pub overlay: OverlayStyle,
}

impl Default for BannerOpts {
    fn default() -> Self {
        Self {
            debug: true,
            timeline: TimelineOpts::default(),
            overlay: OverlayStyle::default(),
        }
    }
}

/// The running banner: scene, timeline and audio stages behind update/draw entry points.
#[derive(Debug)]
pub struct Banner<P> {
    scene: BannerScene,
    timeline: Timeline,
    stages: AudioStages<P>,
    debug: bool,
    key: KeyEdge,
    overlay: OverlayStyle,
    fps: FpsMeter,
    started: Instant,
    commands: Vec<DrawCommand>,
}

impl<P: ClipPlayer> Banner<P> {
    /// Banner at frame 0 with nothing started.
    pub fn new(scene: BannerScene, stages: AudioStages<P>, opts: BannerOpts) -> Self {
        Self {
            scene,
            timeline: Timeline::new(opts.timeline),
            stages,
            debug: opts.debug,
            key: KeyEdge::default(),
            overlay: opts.overlay,
            fps: FpsMeter::default(),
            started: Instant::now(),
            commands: Vec::new(),
        }
    }

    /// Apply one input event.
    pub fn handle_input(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::ToggleDebug => {
                self.debug = !self.debug;
                tracing::debug!(debug = self.debug, "debug overlay toggled");
            }
        }
    }

    /// Feed the polled state of the debug key; only the press itself toggles the overlay.
    pub fn key_state(&mut self, down: bool) {
        if self.key.update(down) {
            self.handle_input(InputEvent::ToggleDebug);
        }
    }

    /// Advance one tick, timing it against the wall clock.
    pub fn update(&mut self) -> TickReport {
        self.update_at(self.started.elapsed())
    }

    /// Advance one tick that runs at `now` since the host started.
    pub fn update_at(&mut self, now: Duration) -> TickReport {
        self.fps.record(now);
        self.timeline.tick(&mut self.stages)
    }

    /// Draw the current frame onto `target`; the caller finishes the frame.
    pub fn draw(&mut self, target: &mut dyn DrawTarget) -> BannerResult<()> {
        let inputs = self.timeline.frame_inputs();
        resolve_into(&self.scene, inputs, &mut self.commands);

        target.begin_frame(Rgba8Premul::WHITE)?;
        for cmd in &self.commands {
            target.draw(cmd)?;
        }
        if self.debug {
            let text = debug_line(self.measured_fps(), inputs.frame, self.scene.window.end);
            draw_text(target, &text, self.overlay)?;
        }
        Ok(())
    }

    /// State the next draw will resolve.
    pub fn frame_inputs(&self) -> FrameInputs {
        self.timeline.frame_inputs()
    }

    /// Scene being played.
    pub fn scene(&self) -> &BannerScene {
        &self.scene
    }

    /// Audio stages.
    pub fn stages(&self) -> &AudioStages<P> {
        &self.stages
    }

    /// Update rate measured over the last second of ticks.
    pub fn measured_fps(&self) -> f64 {
        self.fps.fps()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/banner.rs"]
mod tests;
