//! Rasterization of draw commands.

/// Frame buffer type and the draw target seam.
pub mod backend;
/// `vello_cpu` implementation of [`backend::DrawTarget`].
pub mod cpu;
/// Debug text overlay drawn with a built-in bitmap font.
pub mod overlay;
