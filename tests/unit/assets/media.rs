use super::*;

#[test]
fn f32le_parsing_checks_alignment() {
    assert!(f32le_bytes_to_samples(&[0, 0, 0]).is_err());
    let bytes: Vec<u8> = [1.0f32, -0.5]
        .iter()
        .flat_map(|s| s.to_le_bytes())
        .collect();
    assert_eq!(f32le_bytes_to_samples(&bytes).unwrap(), vec![1.0, -0.5]);
}

#[test]
fn written_file_reads_back_as_the_same_samples() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("clip.f32le");
    let buf = AudioBuffer::from_interleaved(vec![0.25, -0.25, 1.0, 0.0], 48_000, 2).unwrap();

    write_f32le_file(&buf, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(f32le_bytes_to_samples(&bytes).unwrap(), buf.samples());
}

#[test]
fn missing_audio_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = decode_audio_f32(
        Path::new("ffmpeg"),
        &dir.path().join("missing.mp3"),
        48_000,
        2,
    )
    .unwrap_err();
    assert!(matches!(err, WordreelError::Input(_)));
}

#[test]
fn decodes_generated_tone_when_ffmpeg_is_available() {
    if !crate::encode::ffmpeg::is_ffmpeg_on_path() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("tone.wav");
    let status = std::process::Command::new("ffmpeg")
        .args(["-y", "-v", "error", "-f", "lavfi", "-i", "sine=frequency=440:duration=0.5"])
        .arg(&wav)
        .status()
        .unwrap();
    assert!(status.success());

    let buf = decode_audio_f32(Path::new("ffmpeg"), &wav, 48_000, 2).unwrap();
    assert_eq!(buf.channels(), 2);
    assert!((buf.duration_secs() - 0.5).abs() < 0.05);
    assert!(buf.samples().iter().any(|s| s.abs() > 0.1));
}
