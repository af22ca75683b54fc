use super::*;

fn window() -> LoopWindow {
    LoopWindow {
        start: FrameIndex(360),
        end: FrameIndex(1260),
    }
}

#[test]
fn loop_window_validates_order() {
    let empty = LoopWindow {
        start: FrameIndex(10),
        end: FrameIndex(10),
    };
    assert!(empty.validate().is_err());
    let inverted = LoopWindow {
        start: FrameIndex(11),
        end: FrameIndex(10),
    };
    assert!(inverted.validate().is_err());
    let w = window();
    assert!(w.validate().is_ok());
    assert_eq!(w.len_frames(), 900);
}

#[test]
fn loop_window_wraps_at_end_only() {
    let w = window();
    assert_eq!(w.wrap(FrameIndex(1259)), FrameIndex(1259));
    assert_eq!(w.wrap(FrameIndex(1260)), FrameIndex(360));
    assert_eq!(w.wrap(FrameIndex(12)), FrameIndex(12));
    assert!(w.contains(FrameIndex(360)));
    assert!(!w.contains(FrameIndex(1260)));
}

#[test]
fn straddle_requires_strict_crossing() {
    let w = window();
    assert!(w.straddles_start(300, 400));
    assert!(!w.straddles_start(300, 360));
    assert!(!w.straddles_start(360, 400));
}

#[test]
fn fps_validation_and_conversions() {
    assert!(Fps::new(60, 0).is_err());
    assert!(Fps::new(0, 1).is_err());
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.as_f64(), 60.0);
    assert_eq!(fps.frames_to_secs(120), 2.0);
    assert_eq!(fps.secs_to_frames_floor(1.999), 119);
}

#[test]
fn canvas_centre_and_size() {
    let c = Canvas {
        width: 810,
        height: 456,
    };
    assert_eq!(c.center_x(), 405.0);
    assert_eq!(c.size(), Size::new(810.0, 456.0));
}

#[test]
fn white_is_opaque() {
    assert_eq!(Rgba8Premul::WHITE.to_array(), [255, 255, 255, 255]);
    assert_eq!(Rgba8Premul::opaque(1, 2, 3).a, 255);
}
