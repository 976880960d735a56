use super::*;

fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn crop_removes_ten_percent_per_edge() {
    let img = image::RgbaImage::new(500, 400);
    let cropped = crop_watermark(&img, WATERMARK_BORDER_FRACTION).unwrap();
    assert_eq!(cropped.dimensions(), (400, 320));
}

#[test]
fn crop_keeps_the_center_pixels() {
    let mut img = image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 1, image::Rgba([0, 255, 0, 255]));
    let cropped = crop_watermark(&img, 0.1).unwrap();
    assert_eq!(cropped.dimensions(), (8, 8));
    assert_eq!(cropped.get_pixel(0, 0).0, [0, 255, 0, 255]);
}

#[test]
fn crop_rejects_bad_fraction_and_tiny_images() {
    let img = image::RgbaImage::new(10, 10);
    assert!(matches!(
        crop_watermark(&img, 0.5),
        Err(WordreelError::Validation(_))
    ));
    let tiny = image::RgbaImage::new(1, 1);
    assert!(matches!(
        crop_watermark(&tiny, 0.1),
        Err(WordreelError::Input(_))
    ));
}

#[test]
fn decode_premultiplies() {
    let img = image::RgbaImage::from_pixel(10, 10, image::Rgba([200, 100, 50, 128]));
    let prepared = decode_cropped_image(&png_bytes(&img)).unwrap();
    assert_eq!((prepared.width, prepared.height), (8, 8));
    assert_eq!(&prepared.rgba8_premul[0..4], &[100, 50, 25, 128]);
}

#[test]
fn garbage_bytes_are_an_input_error() {
    assert!(matches!(
        decode_cropped_image(b"not an image"),
        Err(WordreelError::Input(_))
    ));
}

#[test]
fn missing_file_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_subject_image(&dir.path().join("nope.png")),
        Err(WordreelError::Input(_))
    ));
}
