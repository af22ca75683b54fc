use std::sync::Arc;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{BannerError, BannerResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Side of the square placeholder drawn for a missing sprite.
pub const PLACEHOLDER_SIDE: u32 = 64;
/// Placeholder colour (magenta).
pub const PLACEHOLDER_COLOR: Rgba8Premul = Rgba8Premul::opaque(255, 0, 255);

/// Decoded sprite pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BannerResult<DecodedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BannerError::asset(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(BannerError::asset("decoded image has zero size"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Uniform image of `width x height` pixels.
pub fn solid_image(width: u32, height: u32, color: Rgba8Premul) -> DecodedImage {
    let px = color.to_array();
    let n = (width as usize) * (height as usize);
    DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(px.repeat(n)),
    }
}

/// Magenta square substituted for sprites that failed to load.
pub fn placeholder_image() -> DecodedImage {
    solid_image(PLACEHOLDER_SIDE, PLACEHOLDER_SIDE, PLACEHOLDER_COLOR)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
