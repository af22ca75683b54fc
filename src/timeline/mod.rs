//! Fixed-rate frame counter with the intro/loop state machine.

/// Tick-driven controller.
pub mod controller;
