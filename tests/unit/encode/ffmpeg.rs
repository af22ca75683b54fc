use super::*;
use crate::encode::sink::AudioInputConfig;
use crate::foundation::core::Fps;

fn cfg(audio: Option<AudioInputConfig>) -> SinkConfig {
    SinkConfig {
        width: 810,
        height: 456,
        fps: Fps::new(60, 1).unwrap(),
        audio,
    }
}

fn strings(args: Vec<OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let at = args.iter().position(|a| a == flag)?;
    args.get(at + 1).map(String::as_str)
}

#[test]
fn silent_banner_encodes_video_only() {
    let args = strings(encode_args(&cfg(None), Path::new("out/banner.mp4"), true));
    assert_eq!(args.first().map(String::as_str), Some("-y"));
    assert_eq!(value_after(&args, "-s"), Some("810x456"));
    assert_eq!(value_after(&args, "-r"), Some("60/1"));
    assert_eq!(value_after(&args, "-i"), Some("pipe:0"));
    assert!(args.contains(&"-an".to_owned()));
    assert!(!args.contains(&"aac".to_owned()));
    assert_eq!(args.last().map(String::as_str), Some("out/banner.mp4"));
}

#[test]
fn mixed_soundtrack_is_a_second_input() {
    let mix = AudioInputConfig {
        path: PathBuf::from("mix.f32le"),
        sample_rate: 44_100,
        channels: 2,
    };
    let args = strings(encode_args(&cfg(Some(mix)), Path::new("b.mp4"), false));
    assert_eq!(args.first().map(String::as_str), Some("-n"));

    let inputs: Vec<&str> = args
        .iter()
        .enumerate()
        .filter(|(_, a)| *a == "-i")
        .map(|(i, _)| args[i + 1].as_str())
        .collect();
    assert_eq!(inputs, vec!["pipe:0", "mix.f32le"]);
    assert_eq!(value_after(&args, "-ar"), Some("44100"));
    assert_eq!(value_after(&args, "-ac"), Some("2"));
    assert_eq!(value_after(&args, "-c:a"), Some("aac"));
    assert!(args.contains(&"-shortest".to_owned()));
    assert!(!args.contains(&"-an".to_owned()));
}

#[test]
fn odd_canvas_is_rejected_before_spawning() {
    let mut sink = FfmpegSink::new("target/ffmpeg_unit/odd.mp4");
    let err = sink
        .begin(SinkConfig {
            width: 811,
            ..cfg(None)
        })
        .unwrap_err();
    assert!(matches!(err, BannerError::Validation(_)));
}

#[test]
fn frames_before_begin_are_rejected() {
    let mut sink = FfmpegSink::new("unused.mp4").with_overwrite(false);
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![255; 16],
        premultiplied: true,
    };
    assert!(matches!(
        sink.push_frame(FrameIndex(0), &frame),
        Err(BannerError::Encode(_))
    ));
    assert!(sink.end().is_err());
}
