use crate::eval::resolver::DrawCommand;
use crate::foundation::core::{Rect, Rgba8Premul};
use crate::foundation::error::BannerResult;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as `[r, g, b, a]`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Surface the banner draws onto, one frame at a time.
///
/// Calls per frame: `begin_frame`, any number of `draw`/`fill_rect`, then `finish`.
pub trait DrawTarget {
    /// Start a new frame cleared to `clear`.
    fn begin_frame(&mut self, clear: Rgba8Premul) -> BannerResult<()>;

    /// Blit one sprite.
    fn draw(&mut self, cmd: &DrawCommand) -> BannerResult<()>;

    /// Fill an axis-aligned canvas rectangle with a solid colour.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) -> BannerResult<()>;

    /// Rasterize everything queued since `begin_frame`.
    fn finish(&mut self) -> BannerResult<FrameRGBA>;
}
