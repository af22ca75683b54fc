use super::*;
use crate::assets::store::MemoryAssets;
use crate::audio::clip::{AudioClip, AudioCue};
use crate::encode::sink::InMemorySink;
use crate::eval::resolver::DrawCommand;
use crate::foundation::core::{Rect, Rgba8Premul};
use crate::render::cpu::CpuBackend;
use crate::render::overlay::{OverlayStyle, debug_line, text_rects};

#[derive(Default)]
struct Recorder {
    fills: usize,
    rects: Vec<Rect>,
}

impl DrawTarget for Recorder {
    fn begin_frame(&mut self, _clear: Rgba8Premul) -> BannerResult<()> {
        self.fills = 0;
        self.rects.clear();
        Ok(())
    }

    fn draw(&mut self, _cmd: &DrawCommand) -> BannerResult<()> {
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, _color: Rgba8Premul) -> BannerResult<()> {
        self.fills += 1;
        self.rects.push(rect);
        Ok(())
    }

    fn finish(&mut self) -> BannerResult<FrameRGBA> {
        Ok(FrameRGBA {
            width: 1,
            height: 1,
            data: vec![0; 4],
            premultiplied: true,
        })
    }
}

fn clip(frames: usize) -> AudioClip {
    AudioClip::from_interleaved(MIX_SAMPLE_RATE, 2, vec![0.25; frames * 2]).unwrap()
}

fn with_audio() -> MemoryAssets {
    MemoryAssets::default()
        .with_clip(AudioCue::Intro, clip(1000))
        .with_clip(AudioCue::Loop, clip(44_100))
}

fn runner(provider: &dyn AssetProvider, opts: OfflineOpts) -> OfflineRunner {
    OfflineRunner::load(provider, BannerScene::with_bubbles(Vec::new()), opts).unwrap()
}

#[test]
fn zero_ticks_is_rejected() {
    let opts = OfflineOpts {
        ticks: 0,
        ..OfflineOpts::default()
    };
    let err = OfflineRunner::load(
        &MemoryAssets::default(),
        BannerScene::with_bubbles(Vec::new()),
        opts,
    )
    .unwrap_err();
    assert!(matches!(err, BannerError::Validation(_)));
}

#[test]
fn no_clips_means_no_audio_plan() {
    let r = runner(&MemoryAssets::default(), OfflineOpts::default());
    assert!(r.plan_audio().is_none());

    let r = runner(
        &with_audio(),
        OfflineOpts {
            enable_audio: false,
            ..OfflineOpts::default()
        },
    );
    assert!(r.plan_audio().is_none());
}

#[test]
fn audio_plan_places_intro_and_repeating_loop() {
    let r = runner(
        &with_audio(),
        OfflineOpts {
            ticks: 300,
            ..OfflineOpts::default()
        },
    );
    let m = r.plan_audio().unwrap();
    assert_eq!(m.sample_rate, 44_100);
    assert_eq!(m.channels, 2);
    assert_eq!(m.total_samples, 300 * 735);

    let spans: Vec<_> = m
        .segments
        .iter()
        .map(|s| (s.timeline_start_sample, s.timeline_end_sample))
        .collect();
    let loop_at = 236 * 735;
    assert_eq!(
        spans,
        vec![
            (0, 1000),
            (loop_at, loop_at + 44_100),
            (loop_at + 44_100, 300 * 735),
        ]
    );
}

#[test]
fn render_pushes_every_tick_and_cleans_up_the_mix() {
    let r = runner(
        &with_audio(),
        OfflineOpts {
            ticks: 5,
            ..OfflineOpts::default()
        },
    );
    let mut sink = InMemorySink::new();
    let stats = r.render(&mut Recorder::default(), &mut sink).unwrap();

    assert_eq!(stats.ticks, 5);
    assert_eq!(stats.intro_started_at, Some(0));
    assert!(stats.music_starts.is_empty());
    assert_eq!(stats.final_frame, FrameIndex(5));
    assert_eq!(stats.audio_segments, 1);

    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    assert!(sink.ended());

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (810, 456));
    let audio = cfg.audio.unwrap();
    assert!(!audio.path.exists());
}

#[test]
fn scripted_toggles_switch_the_overlay() {
    let r = runner(
        &MemoryAssets::default(),
        OfflineOpts {
            debug_toggles: vec![1, 3],
            ..OfflineOpts::default()
        },
    );
    let mut rec = Recorder::default();
    r.render_still(0, &mut rec).unwrap();
    assert!(rec.fills > 0);
    r.render_still(1, &mut rec).unwrap();
    assert_eq!(rec.fills, 0);
    r.render_still(2, &mut rec).unwrap();
    assert_eq!(rec.fills, 0);
    r.render_still(3, &mut rec).unwrap();
    assert!(rec.fills > 0);
}

#[test]
fn key_held_across_ticks_is_one_press() {
    let r = runner(
        &MemoryAssets::default(),
        OfflineOpts {
            debug: false,
            debug_toggles: vec![1, 2, 3],
            ..OfflineOpts::default()
        },
    );
    let mut rec = Recorder::default();
    for tick in 1..=4 {
        r.render_still(tick, &mut rec).unwrap();
        assert!(rec.fills > 0, "overlay hidden at tick {tick}");
    }
}

#[test]
fn debug_overlay_is_identical_across_runs() {
    let r = runner(&MemoryAssets::default(), OfflineOpts::default());
    let mut a = Recorder::default();
    let mut b = Recorder::default();
    r.render_still(300, &mut a).unwrap();
    r.render_still(300, &mut b).unwrap();
    assert!(!a.rects.is_empty());
    assert_eq!(a.rects, b.rects);

    let text = debug_line(60.0, FrameIndex(301), FrameIndex(1260));
    assert_eq!(text, "FPS: 60.00, Frame: 301/1260");
    let style = OverlayStyle::default();
    assert!(a.rects.ends_with(&text_rects(&text, style.origin, style.pixel)));
}

#[test]
fn silent_first_frame_is_a_white_flash() {
    let r = runner(&MemoryAssets::default(), OfflineOpts::default());
    let mut backend = CpuBackend::new(r.scene().canvas, r.sprites()).unwrap();
    let frame = r.render_still(0, &mut backend).unwrap();
    assert_eq!((frame.width, frame.height), (810, 456));
    assert_eq!(frame.pixel(405, 228), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(0, 455), Some([255, 255, 255, 255]));
}

#[test]
fn long_run_wraps_the_counter() {
    let r = runner(
        &MemoryAssets::default(),
        OfflineOpts {
            ticks: 1300,
            ..OfflineOpts::default()
        },
    );
    let mut sink = InMemorySink::new();
    let stats = r.render(&mut Recorder::default(), &mut sink).unwrap();
    assert_eq!(stats.wraps, 1);
    assert_eq!(stats.final_frame, FrameIndex(360 + 1300 - 1260));
    assert_eq!(sink.config().unwrap().audio.map(|a| a.path), None);
}
