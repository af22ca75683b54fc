/// Easing curves.
pub mod ease;
/// Oscillators and fade envelopes driven by the frame counter.
pub mod motion;
