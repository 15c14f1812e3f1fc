use super::*;

#[test]
fn new_buffer_is_transparent() {
    let fb = Framebuffer::new(3, 2).unwrap();
    assert_eq!(fb.as_bytes().len(), 3 * 2 * 4);
    assert!(fb.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn zero_sized_buffer_is_rejected() {
    assert!(Framebuffer::new(0, 10).is_err());
    assert!(Framebuffer::new(10, 0).is_err());
}

#[test]
fn byte_view_is_rgba_order() {
    let mut fb = Framebuffer::new(2, 1).unwrap();
    let idx = fb.index(1, 0);
    fb.words_mut()[idx] = Rgba8::new(1, 2, 3, 4).to_packed();
    assert_eq!(&fb.as_bytes()[4..8], &[1, 2, 3, 4]);
    assert_eq!(fb.pixel(1, 0), Some(Rgba8::new(1, 2, 3, 4)));
    assert_eq!(fb.pixel(2, 0), None);
    assert_eq!(fb.pixel(-1, 0), None);
}

#[test]
fn packed_word_layout_matches_contract() {
    let c = Rgba8::new(0x11, 0x22, 0x33, 0x44);
    assert_eq!(c.to_packed(), 0x4433_2211);
    assert_eq!(Rgba8::from_packed(0x4433_2211), c);
}
