use crate::foundation::core::{FrameIndex, Point, Rect, Rgba8Premul};
use crate::foundation::error::BannerResult;
use crate::render::backend::DrawTarget;

const GLYPH_W: u32 = 5;
const GLYPH_H: usize = 7;
const ADVANCE: u32 = GLYPH_W + 1;

/// Debug readout placement and colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    /// Top-left corner of the first glyph.
    pub origin: Point,
    /// Size of one font pixel in canvas pixels.
    pub pixel: f64,
    /// Glyph colour.
    pub color: Rgba8Premul,
    /// Drop shadow colour, offset by one font pixel.
    pub shadow: Option<Rgba8Premul>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            origin: Point::new(4.0, 4.0),
            pixel: 2.0,
            color: Rgba8Premul::WHITE,
            shadow: Some(Rgba8Premul::opaque(0, 0, 0)),
        }
    }
}

/// Readout text, e.g. `FPS: 59.98, Frame: 412/1260`.
pub fn debug_line(fps: f64, frame: FrameIndex, loop_end: FrameIndex) -> String {
    format!("FPS: {fps:0.2}, Frame: {}/{}", frame.0, loop_end.0)
}

/// Rectangles covering the lit pixels of `text`, one per horizontal run.
///
/// Characters without a glyph advance the pen but draw nothing.
pub fn text_rects(text: &str, origin: Point, pixel: f64) -> Vec<Rect> {
    let mut out = Vec::new();
    for (col, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else { continue };
        let gx = origin.x + f64::from(col as u32 * ADVANCE) * pixel;
        for (row, bits) in rows.iter().enumerate() {
            let y0 = origin.y + row as f64 * pixel;
            let mut x = 0;
            while x < GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - x)) == 0 {
                    x += 1;
                    continue;
                }
                let run_start = x;
                while x < GLYPH_W && bits & (1 << (GLYPH_W - 1 - x)) != 0 {
                    x += 1;
                }
                out.push(Rect::new(
                    gx + f64::from(run_start) * pixel,
                    y0,
                    gx + f64::from(x) * pixel,
                    y0 + pixel,
                ));
            }
        }
    }
    out
}

/// Draw `text` onto `target` with `style`.
pub fn draw_text(target: &mut dyn DrawTarget, text: &str, style: OverlayStyle) -> BannerResult<()> {
    if let Some(shadow) = style.shadow {
        let o = Point::new(style.origin.x + style.pixel, style.origin.y + style.pixel);
        for r in text_rects(text, o, style.pixel) {
            target.fill_rect(r, shadow)?;
        }
    }
    for r in text_rects(text, style.origin, style.pixel) {
        target.fill_rect(r, style.color)?;
    }
    Ok(())
}

// 5x7 rows, most significant of the low five bits is the leftmost column.
fn glyph(ch: char) -> Option<[u8; GLYPH_H]> {
    let g = match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'm' => [0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001],
        'r' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '/' => [0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        _ => return None,
    };
    Some(g)
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
