use super::*;

#[test]
fn kernel_sums_to_one_in_q16() {
    let k = gaussian_kernel_q16(6, 2.0).unwrap();
    assert_eq!(k.len(), 13);
    assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65_536);
    assert!(k[6] > k[5] && k[5] > k[0]);
}

#[test]
fn uniform_mask_is_unchanged() {
    let src = vec![77u8; 16 * 9];
    assert_eq!(blur_mask(&src, 16, 9, 4, 2.0).unwrap(), src);
}

#[test]
fn single_dot_spreads_symmetrically() {
    let (w, h) = (21u32, 21u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(10 * w + 10) as usize] = 255;
    let out = blur_mask(&src, w, h, 6, 2.0).unwrap();

    let at = |x: u32, y: u32| out[(y * w + x) as usize];
    assert!(at(10, 10) < 255);
    assert!(at(11, 10) > 0);
    assert_eq!(at(9, 10), at(11, 10));
    assert_eq!(at(10, 9), at(10, 11));
    assert!(at(9, 10).abs_diff(at(10, 9)) <= 1);
}

#[test]
fn zero_radius_and_bad_inputs() {
    let src = vec![1u8, 2, 3, 4];
    assert_eq!(blur_mask(&src, 2, 2, 0, 1.0).unwrap(), src);
    assert!(blur_mask(&src, 3, 2, 1, 1.0).is_err());
    assert!(blur_mask(&src, 2, 2, 1, 0.0).is_err());
}
