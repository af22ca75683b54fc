use std::sync::Arc;

use crate::assets::decode::DecodedImage;
use crate::assets::store::SpriteStore;
use crate::eval::resolver::DrawCommand;
use crate::foundation::core::{Affine, Canvas, Rect, Rgba8Premul};
use crate::foundation::error::{BannerError, BannerResult};
use crate::render::backend::{DrawTarget, FrameRGBA};

#[derive(Clone)]
struct ImagePaint {
    paint: vello_cpu::Image,
    w: f64,
    h: f64,
}

/// CPU rasterizer built on `vello_cpu`.
///
/// Sprite paints are prepared once from the [`SpriteStore`]; frames are drawn into a reused
/// render context.
pub struct CpuBackend {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    paints: Vec<ImagePaint>,
    in_frame: bool,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("canvas", &self.canvas)
            .field("sprites", &self.paints.len())
            .finish_non_exhaustive()
    }
}

impl CpuBackend {
    /// Prepare paints for every sprite in `sprites` and a context sized to `canvas`.
    pub fn new(canvas: Canvas, sprites: &SpriteStore) -> BannerResult<Self> {
        let width = to_u16(canvas.width, "canvas width")?;
        let height = to_u16(canvas.height, "canvas height")?;
        let paints = sprites
            .iter()
            .map(|(_, img)| image_paint(img))
            .collect::<BannerResult<Vec<_>>>()?;
        Ok(Self {
            canvas,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            paints,
            in_frame: false,
        })
    }

    /// Surface size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn ensure_in_frame(&self) -> BannerResult<()> {
        if self.in_frame {
            Ok(())
        } else {
            Err(BannerError::render("draw call outside begin_frame/finish"))
        }
    }
}

impl DrawTarget for CpuBackend {
    fn begin_frame(&mut self, clear: Rgba8Premul) -> BannerResult<()> {
        self.ctx.reset();
        self.in_frame = true;
        self.fill_rect(
            Rect::new(
                0.0,
                0.0,
                f64::from(self.canvas.width),
                f64::from(self.canvas.height),
            ),
            clear,
        )
    }

    fn draw(&mut self, cmd: &DrawCommand) -> BannerResult<()> {
        self.ensure_in_frame()?;
        let opacity = cmd.opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return Ok(());
        }
        let p = &self.paints[cmd.sprite.index()];
        let tr = match cmd.stretch_to {
            Some(size) => cmd.transform * Affine::scale_non_uniform(size.width / p.w, size.height / p.h),
            None => cmd.transform,
        };

        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(tr));
        self.ctx.set_paint(p.paint.clone());
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, p.w, p.h));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) -> BannerResult<()> {
        self.ensure_in_frame()?;
        self.ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        Ok(())
    }

    fn finish(&mut self) -> BannerResult<FrameRGBA> {
        self.ensure_in_frame()?;
        self.in_frame = false;
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn image_paint(img: &DecodedImage) -> BannerResult<ImagePaint> {
    let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
    Ok(ImagePaint {
        paint: vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        w: f64::from(img.width),
        h: f64::from(img.height),
    })
}

fn to_u16(v: u32, what: &str) -> BannerResult<u16> {
    v.try_into()
        .map_err(|_| BannerError::render(format!("{what} exceeds u16")))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BannerResult<vello_cpu::Pixmap> {
    let w = to_u16(width, "sprite width")?;
    let h = to_u16(height, "sprite height")?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BannerError::render("sprite byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
