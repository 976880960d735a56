use super::*;

#[test]
fn fnv_matches_reference_vectors() {
    assert_eq!(seed_for_word(""), Fnv1a64::OFFSET_BASIS);
    assert_eq!(seed_for_word("a"), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn word_seed_is_stable_and_word_specific() {
    assert_eq!(seed_for_word("apple"), seed_for_word("apple"));
    assert_ne!(seed_for_word("apple"), seed_for_word("apply"));
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(255, 0), 0);
    assert_eq!(mul_div255_u16(128, 128), 64);
}

#[test]
fn premultiply_scales_color_by_alpha() {
    let mut px = [200, 100, 50, 128, 9, 9, 9, 0, 1, 2, 3, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[100, 50, 25, 128]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[1, 2, 3, 255]);
}
