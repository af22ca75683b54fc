//! Static banner tables and the per-run scene (bubble table plus decorations).

/// Banner constants, sprite tables and [`banner::BannerScene`].
pub mod banner;
/// Sprite identifiers, bubble records and animated elements.
pub mod model;
