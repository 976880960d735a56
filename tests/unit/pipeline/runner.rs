use super::*;
use crate::encode::ffmpeg::EncoderSettings;
use crate::text::font::find_font;

fn fonts_available() -> bool {
    find_font(WORD_FONT_CANDIDATES).is_some() && find_font(CAPTION_FONT_CANDIDATES).is_some()
}

fn write_test_image(path: &std::path::Path) {
    let img = image::RgbaImage::from_pixel(50, 50, image::Rgba([30, 160, 90, 255]));
    img.save(path).unwrap();
}

#[test]
fn missing_encoder_fails_construction() {
    let config = PipelineConfig {
        encoder: EncoderSettings {
            ffmpeg: "/no/such/dir/ffmpeg".into(),
            ..EncoderSettings::default()
        },
        ..PipelineConfig::default()
    };
    assert!(matches!(
        VideoPipeline::new(config),
        Err(WordreelError::EncoderUnavailable(_))
    ));
}

#[test]
fn invalid_config_fails_before_loading_fonts() {
    let config = PipelineConfig {
        repeat_count: 0,
        ..PipelineConfig::default()
    };
    assert!(matches!(
        JobRenderer::new(config),
        Err(WordreelError::Validation(_))
    ));
}

#[test]
fn seed_precedence_is_job_then_config_then_word() {
    if !fonts_available() {
        return;
    }
    let job = WordJob::new("apple", "a.mp3", "a.png", vec![], "a.mp4").unwrap();

    let renderer = JobRenderer::new(PipelineConfig::default()).unwrap();
    assert_eq!(renderer.seed_for(&job), seed_for_word("apple"));

    let renderer = JobRenderer::new(PipelineConfig {
        seed: Some(7),
        ..PipelineConfig::default()
    })
    .unwrap();
    assert_eq!(renderer.seed_for(&job), 7);
    assert_eq!(renderer.seed_for(&job.clone().with_seed(9)), 9);
}

#[test]
fn preview_renders_one_frame() {
    if !fonts_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("subject.png");
    write_test_image(&image);

    let mut renderer = JobRenderer::new(PipelineConfig::default()).unwrap();
    let job = WordJob::new(
        "apple",
        "unused.mp3",
        &image,
        vec!["苹果".to_owned()],
        dir.path().join("apple.mp4"),
    )
    .unwrap();

    let surface = renderer.render_preview(&job, 450, 900).unwrap();
    assert_eq!((surface.width(), surface.height()), (1280, 720));

    assert!(renderer.render_preview(&job, 900, 900).is_err());
    assert!(renderer.render_preview(&job, 0, 0).is_err());
}

#[test]
fn preview_with_missing_image_is_an_input_error() {
    if !fonts_available() {
        return;
    }
    let mut renderer = JobRenderer::new(PipelineConfig::default()).unwrap();
    let job = WordJob::new("apple", "a.mp3", "/no/such/image.png", vec![], "a.mp4").unwrap();
    assert!(matches!(
        renderer.render_preview(&job, 0, 10),
        Err(WordreelError::Input(_))
    ));
}
