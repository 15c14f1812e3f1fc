use super::*;

#[test]
fn fresh_mask_is_fully_visible() {
    let m = ClipMask::new(5, 3);
    assert_eq!(m.as_bytes().len(), 2);
    assert!(m.is_all_visible());
    assert!(m.is_visible(4, 2));
    assert!(!m.is_visible(5, 0));
}

#[test]
fn bits_are_msb_first() {
    let mut m = ClipMask::new_clipped(8, 2);
    let idx = m.bit_index(1, 0);
    m.set_bit(idx);
    assert_eq!(m.as_bytes()[0], 0b0100_0000);
    let idx = m.bit_index(0, 1);
    m.set_bit(idx);
    assert_eq!(m.as_bytes()[1], 0b1000_0000);
    assert!(m.is_visible(1, 0));
    assert!(!m.is_visible(2, 0));
}

#[test]
fn intersection_narrows_and_tracks_visibility() {
    let mut current = ClipMask::new(4, 4);
    let mut scratch = ClipMask::new_clipped(4, 4);
    let start = scratch.bit_index(1, 1);
    scratch.set_bit_range(start, 2);
    current.intersect_with(&scratch);
    assert!(!current.is_all_visible());
    assert!(current.is_visible(1, 1));
    assert!(current.is_visible(2, 1));
    assert!(!current.is_visible(0, 1));
    assert!(!current.is_visible(3, 1));
}

#[test]
fn intersect_with_full_mask_stays_all_visible() {
    // 3x3 leaves 7 padding bits in the last byte; they must not matter.
    let mut a = ClipMask::new(3, 3);
    let mut b = ClipMask::new_clipped(3, 3);
    b.set_bit_range(0, 9);
    a.intersect_with(&b);
    assert!(a.is_all_visible());
}

#[test]
fn set_bit_range_handles_unaligned_spans() {
    let mut m = ClipMask::new_clipped(32, 1);
    m.set_bit_range(3, 20);
    for x in 0..32 {
        assert_eq!(m.is_visible(x, 0), (3..23).contains(&x), "x={x}");
    }
}
