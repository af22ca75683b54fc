use super::*;

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 2,
        data: vec![255; 16],
        premultiplied: true,
    }
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(60, 1).unwrap(),
        audio: None,
    }
}

#[test]
fn in_memory_sink_captures_config_and_frames() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
    sink.push_frame(FrameIndex(1), &frame()).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames().len(), 2);
    assert_eq!(sink.config().map(|c| c.width), Some(2));
    assert!(sink.ended());
}

#[test]
fn sinks_reject_repeated_or_backwards_indices() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(5), &frame()).unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(5), &frame()),
        Err(BannerError::Encode(_))
    ));
    assert!(sink.push_frame(FrameIndex(4), &frame()).is_err());
    sink.push_frame(FrameIndex(6), &frame()).unwrap();
}

#[test]
fn begin_resets_previous_capture() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &frame()).unwrap();
    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    sink.push_frame(FrameIndex(0), &frame()).unwrap();
}
