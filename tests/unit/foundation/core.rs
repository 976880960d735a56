use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::whole(30).unwrap().frames_per_second(), 30);
}

#[test]
fn fractional_fps_rounds_down_per_second() {
    let ntsc = Fps::new(30_000, 1_001).unwrap();
    assert_eq!(ntsc.frames_per_second(), 29);
    assert!((ntsc.as_f64() - 29.97).abs() < 0.01);
}

#[test]
fn thirty_seconds_at_thirty_fps_is_900_frames() {
    let fps = Fps::whole(30).unwrap();
    assert_eq!(fps.frames_for_samples(48_000 * 30, 48_000), 900);
}

#[test]
fn frame_count_rounds_partial_frames_up() {
    let fps = Fps::whole(30).unwrap();
    // 0.5 s + one sample
    assert_eq!(fps.frames_for_samples(24_001, 48_000), 16);
    assert_eq!(fps.frames_for_samples(24_000, 48_000), 15);
    assert_eq!(fps.frames_for_samples(1, 48_000), 1);
    assert_eq!(fps.frames_for_samples(0, 48_000), 0);
}

#[test]
fn canvas_validates_bounds() {
    assert!(Canvas::new(0, 720).is_err());
    assert!(Canvas::new(70_000, 720).is_err());
    let c = Canvas::new(1280, 720).unwrap();
    assert_eq!(c.width_f64(), 1280.0);
}

#[test]
fn progress_is_clamped_and_monotone() {
    let total = 900;
    let mut last = -1.0;
    for i in 0..=total + 10 {
        let p = FrameSpec::new(FrameIndex(i), total).progress();
        assert!((0.0..=1.0).contains(&p));
        assert!(p >= last);
        last = p;
    }
    assert_eq!(FrameSpec::new(FrameIndex(3), 0).progress(), 1.0);
}

#[test]
fn halfway_frame_reads_fifty_percent() {
    assert_eq!(FrameSpec::new(FrameIndex(450), 900).percent_label(), "50%");
    assert_eq!(FrameSpec::new(FrameIndex(0), 900).percent_label(), "0%");
}

#[test]
fn success_window_starts_one_second_before_the_end() {
    let fps = Fps::whole(30).unwrap();
    assert!(!FrameSpec::new(FrameIndex(869), 900).in_final_second(fps));
    assert!(FrameSpec::new(FrameIndex(870), 900).in_final_second(fps));
    assert!(FrameSpec::new(FrameIndex(885), 900).in_final_second(fps));
    assert!(FrameSpec::new(FrameIndex(899), 900).in_final_second(fps));
}
