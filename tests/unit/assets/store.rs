use std::io::Cursor;

use super::*;

fn tiny_png(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn from_rgba8_premultiplies_and_checks_length() {
    let img = RasterImage::from_rgba8(1, 1, vec![200, 100, 50, 128]).unwrap();
    assert_eq!(img.rgba8_premul.as_slice(), &[100, 50, 25, 128]);

    assert!(RasterImage::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(RasterImage::from_rgba8(0, 2, Vec::new()).is_err());
    assert!(RasterImage::from_rgba8(MAX_IMAGE_EXTENT + 1, 1, vec![0; 4 * 65_536]).is_err());
}

#[test]
fn upload_accepts_images() {
    let mut store = ImageStore::new();
    store
        .load_upload("photo", "image/png", &tiny_png([1, 2, 3, 255]))
        .unwrap();
    let img = store.get("photo").unwrap();
    assert_eq!((img.width(), img.height()), (2, 2));
}

#[test]
fn upload_rejects_non_image_media_type_and_keeps_previous() {
    let mut store = ImageStore::new();
    store
        .load_upload("photo", "image/png", &tiny_png([9, 9, 9, 255]))
        .unwrap();
    let before = store.get("photo").cloned().unwrap();

    let err = store
        .load_upload("photo", "text/plain", &tiny_png([1, 1, 1, 255]))
        .unwrap_err();
    assert_eq!(err.message(), UPLOAD_INVALID_TYPE_MESSAGE);
    assert!(Arc::ptr_eq(store.get("photo").unwrap(), &before));
}

#[test]
fn upload_decode_failure_keeps_previous() {
    let mut store = ImageStore::new();
    store
        .load_upload("background", "image/png", &tiny_png([9, 9, 9, 255]))
        .unwrap();

    let err = store
        .load_upload("background", "image/jpeg", b"\xff\xd8 broken")
        .unwrap_err();
    assert_eq!(err.message(), UPLOAD_DECODE_FAILED_MESSAGE);
    assert_eq!(store.len(), 1);

    let mut empty = ImageStore::new();
    assert!(empty.load_upload("photo", "image/png", b"nope").is_err());
    assert!(!empty.contains("photo"));
}

#[test]
fn insert_and_remove() {
    let mut store = ImageStore::new();
    assert!(store.is_empty());
    let img = RasterImage::from_rgba8(1, 1, vec![0, 0, 0, 255]).unwrap();
    assert!(store.insert("a", img.clone()).is_none());
    assert!(store.insert("a", img).is_some());
    assert!(store.remove("a").is_some());
    assert!(store.get("a").is_none());
}

#[test]
fn oversized_upload_keeps_previous_image() {
    let mut store = ImageStore::new();
    store
        .load_upload("photo", "image/png", &tiny_png([9, 9, 9, 255]))
        .unwrap();
    let before = store.get("photo").cloned().unwrap();

    let wide =
        image::RgbaImage::from_pixel(MAX_IMAGE_EXTENT + 1, 1, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(wide)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let err = store.load_upload("photo", "image/png", &buf).unwrap_err();
    assert_eq!(err.message(), UPLOAD_DECODE_FAILED_MESSAGE);
    assert!(Arc::ptr_eq(store.get("photo").unwrap(), &before));
}
