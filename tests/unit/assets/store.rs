use std::io::Cursor;

use super::*;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("springreel-store-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn load_image_reads_relative_to_root() {
    let dir = scratch_dir("png");
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.join("logo.png"), &buf).unwrap();

    let mut store = AssetStore::new(&dir);
    store.load_image("logo", "logo.png").unwrap();
    let logo = store.image("logo").unwrap();
    assert_eq!((logo.width, logo.height), (3, 2));
    assert!(store.has_image("logo"));
    assert!(!store.has_image("other"));
}

#[test]
fn missing_files_surface_the_path() {
    let dir = scratch_dir("missing");
    let mut store = AssetStore::new(&dir);
    let err = store.load_image("logo", "nope.png").unwrap_err();
    assert!(err.to_string().contains("nope.png"));
    assert!(store.load_font("nope.ttf").is_err());
    assert!(store.font().is_none());
}

#[test]
fn load_font_keeps_raw_bytes() {
    let dir = scratch_dir("font");
    std::fs::write(dir.join("face.ttf"), b"\0\x01\0\0fake").unwrap();
    let mut store = AssetStore::new(&dir);
    store.load_font("face.ttf").unwrap();
    let font = store.font().unwrap();
    assert_eq!(font.source, "face.ttf");
    assert_eq!(font.bytes.len(), 8);
}
