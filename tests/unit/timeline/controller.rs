use super::*;

#[derive(Debug, Default)]
struct FakePlayer {
    plays: u32,
    playing: bool,
}

impl ClipPlayer for FakePlayer {
    fn play(&mut self) {
        self.plays += 1;
        self.playing = true;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

fn stages() -> AudioStages<FakePlayer> {
    AudioStages {
        intro: Some(FakePlayer::default()),
        music: Some(FakePlayer::default()),
    }
}

#[test]
fn intro_starts_on_first_tick_and_only_once() {
    let mut tl = Timeline::new(TimelineOpts::default());
    let mut st = stages();
    assert!(!tl.intro_started());

    let r = tl.tick(&mut st);
    assert_eq!(r.frame, FrameIndex(1));
    assert!(r.intro_started_now);
    assert!(tl.intro_started());

    // Intro finishes; it must never be replayed.
    if let Some(intro) = st.intro.as_mut() {
        intro.playing = false;
    }
    for _ in 0..3000 {
        assert!(!tl.tick(&mut st).intro_started_now);
    }
    assert_eq!(st.intro.as_ref().map(|p| p.plays), Some(1));
    assert!(tl.intro_started());
}

#[test]
fn music_starts_at_237_and_restarts_when_stopped() {
    let mut tl = Timeline::new(TimelineOpts::default());
    let mut st = stages();
    for expected in 1..=236u64 {
        let r = tl.tick(&mut st);
        assert_eq!(r.frame, FrameIndex(expected));
        assert!(!r.music_started_now);
    }
    let r = tl.tick(&mut st);
    assert_eq!(r.frame, FrameIndex(237));
    assert!(r.music_started_now);

    assert!(!tl.tick(&mut st).music_started_now);
    if let Some(music) = st.music.as_mut() {
        music.playing = false;
    }
    assert!(tl.tick(&mut st).music_started_now);
    assert_eq!(st.music.as_ref().map(|p| p.plays), Some(2));
}

#[test]
fn counter_wraps_from_loop_end_to_loop_start() {
    let mut tl = Timeline::new(TimelineOpts::default());
    let mut st = AudioStages::<FakePlayer>::silent();
    let mut wraps = 0;
    let mut prev = tl.frame();
    for _ in 0..(1260 + 900 * 2) {
        let r = tl.tick(&mut st);
        assert!(r.frame.0 < 1260);
        if r.wrapped {
            wraps += 1;
            assert_eq!(prev, FrameIndex(1259));
            assert_eq!(r.frame, FrameIndex(360));
        } else {
            assert_eq!(r.frame.0, prev.0 + 1);
        }
        prev = r.frame;
    }
    assert_eq!(wraps, 3);
}

#[test]
fn missing_stages_are_skipped_silently() {
    let mut tl = Timeline::new(TimelineOpts::default());
    let mut st = AudioStages::<FakePlayer>::silent();
    for _ in 0..400 {
        let r = tl.tick(&mut st);
        assert!(!r.intro_started_now && !r.music_started_now);
    }
    assert!(!tl.intro_started());
    assert_eq!(tl.frame_inputs().frame, FrameIndex(400));
    assert!(!tl.frame_inputs().intro_started);
}

#[test]
fn busy_intro_player_defers_the_trigger() {
    let mut tl = Timeline::new(TimelineOpts::default());
    let mut st = stages();
    if let Some(intro) = st.intro.as_mut() {
        intro.playing = true;
    }
    assert!(!tl.tick(&mut st).intro_started_now);
    if let Some(intro) = st.intro.as_mut() {
        intro.playing = false;
    }
    let r = tl.tick(&mut st);
    assert!(r.intro_started_now);
    assert_eq!(r.frame, FrameIndex(2));
}
