use super::*;

fn entry(word: &str) -> ManifestEntry {
    ManifestEntry {
        word: word.to_owned(),
        audio: PathBuf::from(format!("{word}.mp3")),
        image: PathBuf::from(format!("{word}.png")),
        translations: vec![],
    }
}

#[test]
fn extracts_standalone_ascii_words() {
    assert_eq!(
        extract_words("Apple, banana\ncherry-pie  DOG"),
        vec!["apple", "banana", "cherry", "pie", "dog"]
    );
    assert_eq!(extract_words("abc123 x_y 9lives ok"), vec!["ok"]);
    assert_eq!(extract_words("苹果apple 苹果 pear"), vec!["pear"]);
    assert!(extract_words("").is_empty());
}

#[test]
fn duplicates_are_kept_in_order() {
    assert_eq!(extract_words("a b a"), vec!["a", "b", "a"]);
}

#[test]
fn output_is_word_dot_mp4() {
    assert_eq!(
        output_path_for(Path::new("/videos"), "apple"),
        PathBuf::from("/videos/apple.mp4")
    );
}

#[test]
fn existing_output_is_skipped_unless_overwriting() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("apple.mp4"), b"old").unwrap();

    let skip = plan_entry(&entry("Apple"), dir.path(), OverwritePolicy::Skip).unwrap();
    assert!(matches!(skip, EntryPlan::Skip { .. }));

    let EntryPlan::Render(job) =
        plan_entry(&entry("Apple"), dir.path(), OverwritePolicy::Overwrite).unwrap()
    else {
        panic!("overwrite policy should render");
    };
    assert_eq!(job.word(), "apple");
    assert_eq!(job.output(), dir.path().join("apple.mp4"));

    let fresh = plan_entry(&entry("pear"), dir.path(), OverwritePolicy::Skip).unwrap();
    assert!(matches!(fresh, EntryPlan::Render(_)));
}

#[test]
fn skipped_entry_reports_the_normalized_word() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("apple.mp4"), b"old").unwrap();

    match plan_entry(&entry(" Apple "), dir.path(), OverwritePolicy::Skip).unwrap() {
        EntryPlan::Skip { word, output } => {
            assert_eq!(word, "apple");
            assert_eq!(output, dir.path().join("apple.mp4"));
        }
        EntryPlan::Render(job) => panic!("expected skip, got job for {}", job.word()),
    }
}

#[test]
fn invalid_word_fails_at_idle() {
    let dir = tempfile::tempdir().unwrap();
    let err = plan_entry(&entry("no way"), dir.path(), OverwritePolicy::Skip).unwrap_err();
    assert_eq!(err.stage, JobStage::Idle);
    assert!(matches!(err.source, WordreelError::Input(_)));
}

#[test]
fn manifest_translations_are_optional() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("m.json");
    std::fs::write(
        &path,
        r#"[
            { "word": "apple", "audio": "a.mp3", "image": "a.png", "translations": ["苹果"] },
            { "word": "pear", "audio": "p.mp3", "image": "p.png" }
        ]"#,
    )
    .unwrap();
    let entries = load_manifest(&path).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].translations, vec!["苹果".to_owned()]);
    assert!(entries[1].translations.is_empty());
}

#[test]
fn summary_counts_outcomes() {
    let summary = BatchSummary {
        outcomes: vec![
            BatchOutcome::Skipped {
                word: "a".to_owned(),
                output: PathBuf::from("a.mp4"),
            },
            BatchOutcome::Failed(JobError::new(
                "b",
                JobStage::Idle,
                WordreelError::input("bad"),
            )),
        ],
    };
    assert_eq!(summary.skipped(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.rendered(), 0);
}
