use super::*;

fn mono(samples: Vec<f32>) -> AudioBuffer {
    AudioBuffer::from_interleaved(samples, 8_000, 1).unwrap()
}

fn opts(run: usize) -> SilenceOpts {
    SilenceOpts {
        threshold_db: -40.0,
        min_silence_run: run,
    }
}

#[test]
fn minus_forty_db_is_one_hundredth() {
    assert!((SilenceOpts::default().linear_threshold() - 0.01).abs() < 1e-6);
}

#[test]
fn all_quiet_input_trims_to_empty() {
    let out = trim_silence(&mono(vec![0.001; 10_000]), &SilenceOpts::default());
    assert!(out.is_empty());
    assert_eq!(out.sample_rate(), 8_000);
}

#[test]
fn leading_and_trailing_silence_is_removed() {
    let mut s = vec![0.0; 100];
    s.extend([0.5, -0.5, 0.5]);
    s.extend(vec![0.0; 100]);
    let out = trim_silence(&mono(s), &opts(2000));
    assert_eq!(out.samples(), &[0.5, -0.5, 0.5]);
}

#[test]
fn short_interior_gap_survives() {
    let mut s = vec![0.5];
    s.extend(vec![0.0; 5]);
    s.push(0.5);
    let out = trim_silence(&mono(s.clone()), &opts(10));
    assert_eq!(out.samples(), s.as_slice());
}

#[test]
fn long_interior_gap_is_capped() {
    let mut s = vec![0.5];
    s.extend(vec![0.0; 50]);
    s.push(0.5);
    let out = trim_silence(&mono(s), &opts(10));
    // first loud sample, run - 1 quiet samples, last loud sample
    assert_eq!(out.samples().len(), 1 + 9 + 1);
    assert_eq!(out.samples()[0], 0.5);
    assert_eq!(out.samples()[10], 0.5);
}

#[test]
fn one_loud_channel_keeps_the_whole_frame() {
    let buf = AudioBuffer::from_interleaved(vec![0.0, 0.0, 0.0, 0.9, 0.0, 0.0], 8_000, 2).unwrap();
    let out = trim_silence(&buf, &opts(2000));
    assert_eq!(out.samples(), &[0.0, 0.9]);
    assert_eq!(out.channels(), 2);
}

#[test]
fn threshold_is_compared_on_magnitude() {
    let out = trim_silence(&mono(vec![0.0, -0.02, 0.005, 0.02, 0.0]), &opts(2000));
    assert_eq!(out.samples(), &[-0.02, 0.005, 0.02]);
}
