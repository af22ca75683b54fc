use crate::audio::player::{AudioStages, ClipPlayer};
use crate::eval::resolver::FrameInputs;
use crate::foundation::core::{FrameIndex, LoopWindow};
use crate::scene::banner::{INTRO_CUE_FRAME, LOOP_WINDOW, MUSIC_CUE_FRAME};

/// Trigger frames and loop bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineOpts {
    /// Loop bounds; the counter jumps to `window.start` on reaching `window.end`.
    pub window: LoopWindow,
    /// Counter value from which the intro cue may start.
    pub intro_cue: FrameIndex,
    /// Counter value from which the music is kept playing.
    pub music_cue: FrameIndex,
}

impl Default for TimelineOpts {
    fn default() -> Self {
        Self {
            window: LOOP_WINDOW,
            intro_cue: INTRO_CUE_FRAME,
            music_cue: MUSIC_CUE_FRAME,
        }
    }
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Counter value after the tick (after any wrap).
    pub frame: FrameIndex,
    /// The intro cue was started on this tick.
    pub intro_started_now: bool,
    /// The music was (re)started on this tick.
    pub music_started_now: bool,
    /// The counter wrapped back to the loop start.
    pub wrapped: bool,
}

/// Owns the frame counter and the one-shot intro flag.
#[derive(Clone, Debug)]
pub struct Timeline {
    opts: TimelineOpts,
    frame: FrameIndex,
    intro_started: bool,
}

impl Timeline {
    /// Fresh timeline at frame 0.
    pub fn new(opts: TimelineOpts) -> Self {
        Self {
            opts,
            frame: FrameIndex(0),
            intro_started: false,
        }
    }

    /// Current counter value.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Whether the intro cue has ever started. Never reset.
    pub fn intro_started(&self) -> bool {
        self.intro_started
    }

    /// State read by the resolver.
    pub fn frame_inputs(&self) -> FrameInputs {
        FrameInputs {
            frame: self.frame,
            intro_started: self.intro_started,
        }
    }

    /// Advance one tick: increment, intro trigger, music trigger, loop wrap.
    pub fn tick<P: ClipPlayer>(&mut self, stages: &mut AudioStages<P>) -> TickReport {
        let mut report = TickReport::default();
        self.frame = FrameIndex(self.frame.0 + 1);

        if !self.intro_started
            && self.frame >= self.opts.intro_cue
            && let Some(intro) = stages.intro.as_mut()
            && !intro.is_playing()
        {
            intro.play();
            self.intro_started = true;
            report.intro_started_now = true;
            tracing::debug!(frame = self.frame.0, "intro cue started");
        }

        if self.frame >= self.opts.music_cue
            && let Some(music) = stages.music.as_mut()
            && !music.is_playing()
        {
            music.play();
            report.music_started_now = true;
            tracing::debug!(frame = self.frame.0, "music started");
        }

        let wrapped = self.opts.window.wrap(self.frame);
        if wrapped != self.frame {
            tracing::trace!(from = self.frame.0, to = wrapped.0, "loop wrap");
            self.frame = wrapped;
            report.wrapped = true;
        }

        report.frame = self.frame;
        report
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/controller.rs"]
mod tests;
