//! Host-facing entry points: the banner context and the offline runner.

/// Update/draw context owning the timeline, audio stages and debug overlay.
pub mod banner;
/// Fixed-tick offline host rendering into a frame sink.
pub mod offline;
