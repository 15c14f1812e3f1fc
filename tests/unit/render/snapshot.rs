use super::*;

fn checker() -> Framebuffer {
    let mut fb = Framebuffer::new(4, 3).unwrap();
    for y in 0..3u8 {
        for x in 0..4u8 {
            let i = fb.index(i32::from(x), i32::from(y));
            fb.words_mut()[i] = Rgba8::new(x, y, 7, 255).to_packed();
        }
    }
    fb
}

#[test]
fn capture_copies_rgba_bytes_in_row_order() {
    let img = ImageData::capture(&checker(), 0, 0, 4, 3).unwrap();
    assert_eq!(img.stride(), 16);
    assert_eq!(img.data.len(), 48);
    assert_eq!(&img.data[0..4], &[0, 0, 7, 255]);
    assert_eq!(&img.data[16 + 4..16 + 8], &[1, 1, 7, 255]);
    assert_eq!(img.pixel(3, 2), Some(Rgba8::new(3, 2, 7, 255)));
    assert_eq!(img.pixel(4, 0), None);
}

#[test]
fn outside_reads_are_transparent() {
    let img = ImageData::capture(&checker(), -1, 1, 3, 3).unwrap();
    assert_eq!(img.pixel(0, 0), Some(Rgba8::TRANSPARENT));
    assert_eq!(img.pixel(1, 0), Some(Rgba8::new(0, 1, 7, 255)));
    assert_eq!(img.pixel(2, 1), Some(Rgba8::new(1, 2, 7, 255)));
    assert_eq!(img.pixel(1, 2), Some(Rgba8::TRANSPARENT));

    let far = ImageData::capture(&checker(), 100, 100, 2, 2).unwrap();
    assert!(far.data.iter().all(|&b| b == 0));
}

#[test]
fn zero_size_is_rejected() {
    let err = ImageData::capture(&checker(), 0, 0, 0, 2).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn converts_to_rgba_image() {
    let img = ImageData::capture(&checker(), 0, 0, 4, 3).unwrap();
    let rgba = img.to_rgba_image().unwrap();
    assert_eq!(rgba.dimensions(), (4, 3));
    assert_eq!(rgba.get_pixel(2, 1).0, [2, 1, 7, 255]);
}

#[test]
fn fingerprint_tracks_content() {
    let a = ImageData::capture(&checker(), 0, 0, 4, 3).unwrap();
    let b = ImageData::capture(&checker(), 0, 0, 4, 3).unwrap();
    let c = ImageData::capture(&checker(), 1, 0, 3, 3).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
}
