use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(255, 128), 128);
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![200, 100, 50, 0, 255, 255, 255, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[0, 0, 0, 0]);
    assert_eq!(&px[4..], &[128, 128, 128, 128]);
}

#[test]
fn flatten_over_white_makes_opaque_output() {
    let src = [0, 0, 0, 0, 64, 0, 0, 128, 10, 20, 30, 255];
    let mut dst = [0u8; 12];
    flatten_premul_over_bg(&mut dst, &src, [255, 255, 255, 255]).unwrap();
    assert_eq!(&dst[..4], &[255, 255, 255, 255]);
    assert_eq!(dst[7], 255);
    assert_eq!(dst[4], 64 + 127);
    assert_eq!(&dst[8..], &[10, 20, 30, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = [0u8; 8];
    assert!(flatten_premul_over_bg(&mut dst, &[0u8; 4], [0, 0, 0, 255]).is_err());
}
