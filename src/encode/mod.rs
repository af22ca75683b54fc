//! Encoding sinks.
//!
//! Sinks consume rendered frames in tick order and are driven by the offline session.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// PNG still and image-sequence output.
pub mod png;
/// Generic frame sink trait and the in-memory sink.
pub mod sink;
