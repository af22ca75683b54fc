use crate::animation::ease::{Ease, lerp};
use crate::animation::motion::FadeEnvelope;
use crate::foundation::core::{Affine, FrameIndex, Size, Vec2};
use crate::scene::banner::{
    BannerScene, FLASH_FADE_FRAMES, FLASH_HOLD_FRAME, FLASH_LAST_FRAME, REVEAL_FRAMES,
    TITLE_FADE_FRAME,
};
use crate::scene::model::{AnimatedElement, Bubble, SpriteId};

const FADE_HEIGHT: f64 = 256.0;
const FADE_REST_Y: f64 = 200.0;
const WAVE_REST_Y: f64 = 140.0;
const TITLE_SIZE: Size = Size::new(400.0, 180.0);
const TITLE_REST_Y: f64 = 32.0;
const TITLE_BOB_CENTER: f64 = 22.0;
const TITLE_BOB_AMPLITUDE: f64 = 10.0;
const TITLE_BOB_PERIOD_FRAMES: f64 = 25.0;

/// Draw category, in back-to-front order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Static white backdrop.
    Background,
    /// Rising gradient.
    Fade,
    /// Wave and shape decorations.
    Wave,
    /// Rising bubbles.
    Bubble,
    /// Channel title.
    Title,
    /// Boom flash over everything.
    Flash,
}

/// One sprite blit.
///
/// The sprite is drawn in its own pixel space (or stretched to `stretch_to` first), then
/// mapped by `transform` onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DrawCommand {
    /// Category, for inspection and ordering checks.
    pub layer: Layer,
    /// Sprite to draw.
    pub sprite: SpriteId,
    /// Sprite space to canvas space.
    pub transform: Affine,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Destination size applied before `transform`, independent of the image's pixel size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stretch_to: Option<Size>,
}

/// Timeline state read by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FrameInputs {
    /// Current frame counter.
    pub frame: FrameIndex,
    /// Whether the intro cue has ever started.
    pub intro_started: bool,
}

/// Resolve `inputs` into draw commands, back to front.
pub fn resolve_frame(scene: &BannerScene, inputs: FrameInputs) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(scene.waves.len() + scene.bubbles.len() / 4 + 4);
    resolve_into(scene, inputs, &mut out);
    out
}

/// Like [`resolve_frame`], reusing `out` (cleared first).
pub fn resolve_into(scene: &BannerScene, inputs: FrameInputs, out: &mut Vec<DrawCommand>) {
    out.clear();
    let frame = inputs.frame;

    out.push(DrawCommand {
        layer: Layer::Background,
        sprite: SpriteId::White,
        transform: Affine::IDENTITY,
        opacity: 1.0,
        stretch_to: None,
    });
    out.push(fade(scene, frame));
    out.extend(scene.waves.iter().map(|w| wave(scene, w, frame)));
    out.extend(scene.bubbles.iter().filter_map(|b| bubble(scene, b, frame)));
    if let Some(cmd) = title(scene, frame) {
        out.push(cmd);
    }
    if let Some(cmd) = flash(scene, inputs) {
        out.push(cmd);
    }
}

/// Eased intro progress in `[0, 1]`; reaches 1 at frame 244 and stays there.
pub fn reveal_progress(frame: FrameIndex) -> f64 {
    Ease::OutSine.apply(frame.as_f64() / REVEAL_FRAMES)
}

/// Title opacity: 0 through frame 243, 1 from frame 244.
pub fn title_alpha(frame: FrameIndex) -> f64 {
    Ease::Linear.apply(frame.as_f64() - TITLE_FADE_FRAME.as_f64())
}

/// Flash opacity, or `None` when the flash is not drawn.
pub fn flash_alpha(inputs: FrameInputs) -> Option<f64> {
    if inputs.intro_started || inputs.frame > FLASH_LAST_FRAME {
        return None;
    }
    let past_hold = inputs.frame.as_f64() - FLASH_HOLD_FRAME.as_f64();
    Some(1.0 - Ease::Linear.apply(past_hold / FLASH_FADE_FRAMES))
}

fn fade(scene: &BannerScene, frame: FrameIndex) -> DrawCommand {
    let canvas_h = f64::from(scene.canvas.height);
    let y = lerp(canvas_h, FADE_REST_Y, reveal_progress(frame));
    DrawCommand {
        layer: Layer::Fade,
        sprite: SpriteId::BannerFade,
        transform: Affine::translate(Vec2::new(0.0, y)),
        opacity: 1.0,
        stretch_to: Some(Size::new(f64::from(scene.canvas.width), FADE_HEIGHT)),
    }
}

fn wave(scene: &BannerScene, el: &AnimatedElement, frame: FrameIndex) -> DrawCommand {
    let baseline = lerp(
        f64::from(scene.canvas.height),
        WAVE_REST_Y,
        reveal_progress(frame),
    );
    let f = frame.as_f64();
    let x = el.base.x + el.motion_x.offset(f);
    let y = baseline + el.base.y + el.motion_y.offset(f);

    let mut t = Affine::translate(Vec2::new(-el.width / 2.0, -el.height / 2.0));
    if el.rotation != 0.0 {
        t = t.then_rotate(el.rotation);
    }
    if el.scale != 0.0 && el.scale != 1.0 {
        t = t.then_scale(el.scale);
    }
    DrawCommand {
        layer: Layer::Wave,
        sprite: el.sprite,
        transform: t.then_translate(Vec2::new(scene.canvas.center_x() + x, y)),
        opacity: 1.0,
        stretch_to: None,
    }
}

fn bubble(scene: &BannerScene, b: &Bubble, frame: FrameIndex) -> Option<DrawCommand> {
    let pose = b.pose_at(frame)?;
    let ty = scene.bubble_types.get(b.type_index)?;
    let transform = Affine::translate(Vec2::new(-ty.width / 2.0, -ty.height / 2.0))
        .then_rotate(pose.rotation)
        .then_scale(b.scale)
        .then_translate(Vec2::new(scene.canvas.center_x() + b.x, pose.y));
    Some(DrawCommand {
        layer: Layer::Bubble,
        sprite: ty.sprite,
        transform,
        opacity: FadeEnvelope::BUBBLE.alpha(pose.progress) as f32,
        stretch_to: None,
    })
}

fn title(scene: &BannerScene, frame: FrameIndex) -> Option<DrawCommand> {
    let alpha = title_alpha(frame);
    if alpha <= 0.0 {
        return None;
    }
    let y = if frame > TITLE_FADE_FRAME {
        TITLE_BOB_CENTER + (frame.as_f64() / TITLE_BOB_PERIOD_FRAMES).sin() * TITLE_BOB_AMPLITUDE
    } else {
        TITLE_REST_Y
    };
    let quarter_h = f64::from(scene.canvas.height) / 4.0;
    let transform = Affine::translate(Vec2::new(-TITLE_SIZE.width / 2.0, TITLE_SIZE.height / 2.0))
        .then_translate(Vec2::new(scene.canvas.center_x(), quarter_h + y));
    Some(DrawCommand {
        layer: Layer::Title,
        sprite: SpriteId::BannerTitle,
        transform,
        opacity: alpha as f32,
        stretch_to: None,
    })
}

fn flash(scene: &BannerScene, inputs: FrameInputs) -> Option<DrawCommand> {
    let alpha = flash_alpha(inputs)?;
    if alpha <= 0.0 {
        return None;
    }
    Some(DrawCommand {
        layer: Layer::Flash,
        sprite: SpriteId::White,
        transform: Affine::IDENTITY,
        opacity: alpha as f32,
        stretch_to: Some(scene.canvas.size()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/resolver.rs"]
mod tests;
