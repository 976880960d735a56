use super::*;
use crate::text::font::{CAPTION_FONT_CANDIDATES, WORD_FONT_CANDIDATES, find_font};

#[test]
fn truncation_counts_characters_not_bytes() {
    assert_eq!(truncate_chars("苹果", 6), "苹果");
    assert_eq!(truncate_chars("一二三四五六七八", 6), "一二三四五六");
    assert_eq!(truncate_chars("abcdefgh", 6), "abcdef");
    assert_eq!(truncate_chars("", 6), "");
}

#[test]
fn missing_font_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("none.ttf");
    assert!(FontFace::resolve(Some(&missing), WORD_FONT_CANDIDATES).is_err());
    assert!(FontFace::resolve(None, &[]).is_err());
}

#[test]
fn line_layout_reports_positive_metrics() {
    let Some(path) = find_font(WORD_FONT_CANDIDATES) else {
        return;
    };
    let face = FontFace::from_path(&path).unwrap();
    let mut engine = TextLayoutEngine::new();

    let short = engine
        .layout_line("ab", &face, 48.0, TextBrushRgba8::BLACK)
        .unwrap();
    let long = engine
        .layout_line("abababab", &face, 48.0, TextBrushRgba8::BLACK)
        .unwrap();
    assert!(short.width > 0.0);
    assert!(short.height > 0.0);
    assert!(short.baseline > 0.0 && short.baseline <= short.height);
    assert!(long.width > short.width * 2.0);
}

#[test]
fn bad_size_is_rejected() {
    let Some(path) = find_font(CAPTION_FONT_CANDIDATES) else {
        return;
    };
    let face = FontFace::from_path(&path).unwrap();
    let mut engine = TextLayoutEngine::new();
    assert!(
        engine
            .layout_line("x", &face, 0.0, TextBrushRgba8::BLACK)
            .is_err()
    );
}
