use std::io::Cursor;

use super::*;

fn encode_png(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&encode_png(3, 2, [100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.width, 3);
    assert_eq!(prepared.height, 2);
    assert_eq!(prepared.rgba8_premul.len(), 3 * 2 * 4);
    assert_eq!(
        &prepared.rgba8_premul[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_are_an_asset_error() {
    let err = decode_image(b"not a png").unwrap_err();
    assert!(matches!(err, BannerError::Asset(_)));
}

#[test]
fn placeholder_is_a_magenta_square() {
    let p = placeholder_image();
    assert_eq!((p.width, p.height), (64, 64));
    assert_eq!(p.rgba8_premul.len(), 64 * 64 * 4);
    assert!(
        p.rgba8_premul
            .chunks_exact(4)
            .all(|px| px == [255, 0, 255, 255])
    );
}
