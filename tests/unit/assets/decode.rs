use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_bytes(2, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!((prepared.width, prepared.height), (2, 1));
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
fn fully_transparent_pixels_lose_color() {
    let prepared = decode_image(&png_bytes(1, 1, [255, 255, 255, 0])).unwrap();
    assert_eq!(prepared.rgba8_premul.as_slice(), &[0, 0, 0, 0]);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn small_svg_is_upscaled_for_rasterization() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="32">
        <rect width="64" height="32" fill="#6EE7FF"/></svg>"##;
    let db = Arc::new(usvg::fontdb::Database::new());
    let img = rasterize_svg(svg, db).unwrap();
    assert_eq!((img.width, img.height), (1024, 512));
    let mid = ((256 * img.width + 512) * 4) as usize;
    assert_eq!(&img.rgba8_premul[mid..mid + 4], &[110, 231, 255, 255]);
}

#[test]
fn malformed_svg_is_rejected() {
    let db = Arc::new(usvg::fontdb::Database::new());
    assert!(rasterize_svg(b"<svg", db).is_err());
}
