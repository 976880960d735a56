use super::*;

#[test]
fn new_surface_is_transparent() {
    let s = RenderSurface::new(Canvas::new(4, 2).unwrap()).unwrap();
    assert_eq!((s.width(), s.height()), (4, 2));
    assert_eq!(s.data().len(), 4 * 2 * 4);
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn pixel_over_flattens_onto_background() {
    let mut s = RenderSurface::new(Canvas::new(2, 2).unwrap()).unwrap();
    s.clear([0, 0, 128, 128]);
    assert_eq!(s.pixel_over(0, 0, [255, 255, 255]), Some([127, 127, 255, 255]));
    assert_eq!(s.pixel_over(2, 0, [255, 255, 255]), None);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0u8; 4], [0, 0, 0]).is_err());
}

#[test]
fn png_is_written_opaque() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let mut s = RenderSurface::new(Canvas::new(3, 3).unwrap()).unwrap();
    s.clear([10, 20, 30, 255]);
    s.save_png(&path, [255, 255, 255]).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 3));
    assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 255]);
}
