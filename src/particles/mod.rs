//! Procedural bubble table generation.

/// Bubble spawning, loop filtering and seam wrapping.
pub mod generator;
