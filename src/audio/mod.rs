//! Audio stages: decoded clips, scheduled players and the offline mix.

/// Decoded PCM clips and cue identifiers.
pub mod clip;
/// Sample-accurate mixing of scheduled segments.
pub mod mix;
/// Playback handles driven by the timeline.
pub mod player;
