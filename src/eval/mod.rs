//! Frame resolution: timeline state in, ordered draw commands out.

/// Pure per-frame resolver.
pub mod resolver;
