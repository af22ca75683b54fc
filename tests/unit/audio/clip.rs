use super::*;

#[test]
fn clip_length_counts_frames_not_samples() {
    let clip = AudioClip::from_interleaved(44_100, 2, vec![0.0; 10]).unwrap();
    assert_eq!(clip.len_frames(), 5);
    assert!(!clip.is_empty());
}

#[test]
fn clip_rejects_ragged_or_degenerate_input() {
    assert!(AudioClip::from_interleaved(44_100, 2, vec![0.0; 3]).is_err());
    assert!(AudioClip::from_interleaved(0, 2, vec![]).is_err());
    assert!(AudioClip::from_interleaved(44_100, 0, vec![]).is_err());
}

#[test]
fn parse_f32le_decodes_and_checks_alignment() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0.5f32.to_le_bytes());
    bytes.extend_from_slice(&(-1.0f32).to_le_bytes());
    assert_eq!(parse_f32le(&bytes).unwrap(), vec![0.5, -1.0]);
    assert!(parse_f32le(&bytes[..5]).is_err());
}

#[test]
fn missing_file_is_an_audio_error() {
    let err = decode_clip_file(Path::new("/nonexistent/intro.wav"), MIX_SAMPLE_RATE).unwrap_err();
    assert!(matches!(err, BannerError::Audio(_)));
}

#[test]
fn cue_file_names() {
    assert_eq!(AudioCue::Intro.file_name(), "intro.wav");
    assert_eq!(AudioCue::Loop.file_name(), "loop.wav");
}
