//! Sprite and audio loading with placeholder fallback.

/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Asset providers and the per-run sprite table.
pub mod store;
