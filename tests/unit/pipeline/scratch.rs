use super::*;

#[test]
fn drop_removes_frames_and_audio() {
    let root = tempfile::tempdir().unwrap();
    let (dir, audio) = {
        let scratch = ScratchArea::create(root.path(), "apple").unwrap();
        std::fs::write(scratch.frames_dir().join("frame_000000.png"), b"x").unwrap();
        std::fs::write(scratch.audio_path(), b"pcm").unwrap();
        assert!(scratch.frames_dir().is_dir());
        (
            scratch.frames_dir().to_path_buf(),
            scratch.audio_path().to_path_buf(),
        )
    };
    assert!(!dir.exists());
    assert!(!audio.exists());
}

#[test]
fn explicit_cleanup_tolerates_missing_audio() {
    let root = tempfile::tempdir().unwrap();
    let scratch = ScratchArea::create(root.path(), "apple").unwrap();
    let dir = scratch.frames_dir().to_path_buf();
    scratch.cleanup().unwrap();
    assert!(!dir.exists());
}

#[test]
fn cleanup_runs_while_unwinding() {
    let root = tempfile::tempdir().unwrap();
    let root_path = root.path().to_path_buf();
    let result = std::panic::catch_unwind(move || {
        let _scratch = ScratchArea::create(&root_path, "apple").unwrap();
        panic!("frame loop blew up");
    });
    assert!(result.is_err());
    assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn two_areas_for_the_same_word_do_not_collide() {
    let root = tempfile::tempdir().unwrap();
    let a = ScratchArea::create(root.path(), "apple").unwrap();
    let b = ScratchArea::create(root.path(), "apple").unwrap();
    assert_ne!(a.frames_dir(), b.frames_dir());
    assert_ne!(a.audio_path(), b.audio_path());
}

#[test]
fn failed_frame_removal_still_removes_audio() {
    let root = tempfile::tempdir().unwrap();
    let scratch = ScratchArea::create(root.path(), "apple").unwrap();
    // A plain file where the frame directory should be makes `remove_dir_all` fail.
    std::fs::remove_dir(scratch.frames_dir()).unwrap();
    std::fs::write(scratch.frames_dir(), b"not a dir").unwrap();
    std::fs::write(scratch.audio_path(), b"pcm").unwrap();
    let audio = scratch.audio_path().to_path_buf();

    assert!(scratch.cleanup().is_err());
    assert!(!audio.exists());
}
