use super::*;

#[test]
fn sdf_is_negative_inside_and_positive_outside() {
    let rr = RoundedRect::new(0.0, 0.0, 100.0, 40.0, 20.0);
    assert!(rounded_rect_sdf(&rr, Point::new(50.0, 20.0)) < 0.0);
    assert!(rounded_rect_sdf(&rr, Point::new(150.0, 20.0)) > 0.0);
    // corner cut off by the radius
    assert!(rounded_rect_sdf(&rr, Point::new(1.0, 1.0)) > 0.0);
    assert!((rounded_rect_sdf(&rr, Point::new(50.0, 0.0))).abs() < 1e-9);
}

#[test]
fn premul_image_checks_sizes() {
    assert!(premul_image(&[0u8; 16], 2, 2).is_ok());
    assert!(premul_image(&[0u8; 12], 2, 2).is_err());
    assert!(premul_image(&[], 70_000, 0).is_err());
}

#[test]
fn shadow_image_has_padding_and_soft_edges() {
    let s = soft_shadow(100.0, 40.0, 20.0, 4.0, 50).unwrap();
    assert_eq!(s.pad, 12.0);
    assert_eq!(s.width, 124.0);
    assert_eq!(s.height, 64.0);
}

#[test]
fn bezpath_conversion_keeps_elements() {
    let rr = RoundedRect::new(0.0, 0.0, 10.0, 10.0, 2.0);
    let src = rr.to_path(0.1);
    let out = rounded_rect_path(rr);
    assert_eq!(out.elements().len(), src.elements().len());
}

#[test]
fn centered_transform_puts_baseline_on_anchor() {
    let Some(path) = crate::text::font::find_font(crate::text::font::WORD_FONT_CANDIDATES) else {
        return;
    };
    let face = crate::text::font::FontFace::from_path(&path).unwrap();
    let mut engine = crate::text::layout::TextLayoutEngine::new();
    let text = engine
        .layout_line("apple", &face, 48.0, crate::text::layout::TextBrushRgba8::BLACK)
        .unwrap();

    let anchor = Point::new(640.0, 300.0);
    let tr = centered_on_baseline(&text, anchor);
    let origin = tr * Point::new(f64::from(text.width) / 2.0, f64::from(text.baseline));
    assert!((origin.x - anchor.x).abs() < 1e-6);
    assert!((origin.y - anchor.y).abs() < 1e-6);
}
