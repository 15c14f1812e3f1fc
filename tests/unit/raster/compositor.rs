use super::*;

struct Fixture {
    fb: Framebuffer,
    clip: ClipMask,
    scratch: ClipMask,
}

impl Fixture {
    fn new(w: u32, h: u32) -> Self {
        Self {
            fb: Framebuffer::new(w, h).unwrap(),
            clip: ClipMask::new(w, h),
            scratch: ClipMask::new_clipped(w, h),
        }
    }

    fn comp(&mut self, alpha: f64) -> Compositor<'_> {
        Compositor::new(&mut self.fb, &self.clip, &mut self.scratch, alpha)
    }
}

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);

#[test]
fn opaque_write_is_exact_over_any_background() {
    let mut f = Fixture::new(2, 1);
    f.fb.fill(Rgba8::new(10, 200, 30, 77));
    f.comp(1.0).set_pixel(0, 0, RED);
    assert_eq!(f.fb.pixel(0, 0), Some(RED));
    assert_eq!(f.fb.pixel(1, 0), Some(Rgba8::new(10, 200, 30, 77)));
}

#[test]
fn out_of_bounds_writes_are_ignored() {
    let mut f = Fixture::new(2, 2);
    let mut c = f.comp(1.0);
    c.set_pixel(-1, 0, RED);
    c.set_pixel(2, 0, RED);
    c.set_pixel(0, 2, RED);
    c.set_pixel_runs(&[PixelRun::new(-5, 1, 3), PixelRun::new(1, -1, 4)], RED);
    assert!(f.fb.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn runs_are_clamped_to_buffer_edges() {
    let mut f = Fixture::new(4, 1);
    f.comp(1.0).set_pixel_runs(&[PixelRun::new(-2, 0, 4)], RED);
    assert_eq!(f.fb.pixel(0, 0), Some(RED));
    assert_eq!(f.fb.pixel(1, 0), Some(RED));
    assert_eq!(f.fb.pixel(2, 0), Some(Rgba8::TRANSPARENT));
}

#[test]
fn half_alpha_over_transparent_keeps_color() {
    let mut f = Fixture::new(1, 1);
    f.comp(0.5).set_pixel(0, 0, RED);
    assert_eq!(f.fb.pixel(0, 0), Some(Rgba8::new(255, 0, 0, 128)));
}

#[test]
fn semi_transparent_over_opaque_mixes_channels() {
    let out = blend_over(Rgba8::opaque(0, 0, 255).to_packed(), Rgba8::new(255, 0, 0, 128), 1.0);
    let out = Rgba8::from_packed(out);
    assert_eq!(out.a, 255);
    assert_eq!(out.r, 128);
    assert_eq!(out.b, 127);
}

#[test]
fn zero_alpha_is_noop() {
    let dst = Rgba8::new(1, 2, 3, 4).to_packed();
    assert_eq!(blend_over(dst, Rgba8::new(9, 9, 9, 0), 1.0), dst);
    assert_eq!(blend_over(0, Rgba8::new(9, 9, 9, 0), 1.0), 0);
}

#[test]
fn clipped_pixels_are_never_written() {
    let mut f = Fixture::new(20, 2);
    let mut scratch = ClipMask::new_clipped(20, 2);
    let start = scratch.bit_index(3, 0);
    scratch.set_bit_range(start, 12);
    f.clip.intersect_with(&scratch);

    f.comp(1.0).set_pixel_runs(&[PixelRun::new(0, 0, 20), PixelRun::new(0, 1, 20)], RED);
    f.comp(0.5).set_pixel_runs(&[PixelRun::new(0, 0, 20)], Rgba8::opaque(0, 255, 0));
    for x in 0..20 {
        let expect_painted = (3..15).contains(&x);
        assert_eq!(f.fb.pixel(x, 0).unwrap().a != 0, expect_painted, "x={x}");
        assert_eq!(f.fb.pixel(x, 1).unwrap().a, 0, "row 1 is fully clipped");
    }
}

#[test]
fn clip_ink_marks_scratch_only() {
    let mut f = Fixture::new(10, 1);
    f.comp(1.0).apply_run(PixelRun::new(2, 0, 5), Ink::Clip);
    assert!(f.fb.as_bytes().iter().all(|&b| b == 0));
    for x in 0..10 {
        assert_eq!(f.scratch.is_visible(x, 0), (2..7).contains(&x));
    }
}

#[test]
fn erase_respects_clip() {
    let mut f = Fixture::new(4, 1);
    f.fb.fill(RED);
    let mut scratch = ClipMask::new_clipped(4, 1);
    scratch.set_bit_range(1, 2);
    f.clip.intersect_with(&scratch);
    f.comp(1.0).apply_run(PixelRun::new(0, 0, 4), Ink::Erase);
    assert_eq!(f.fb.pixel(0, 0), Some(RED));
    assert_eq!(f.fb.pixel(1, 0), Some(Rgba8::TRANSPARENT));
    assert_eq!(f.fb.pixel(2, 0), Some(Rgba8::TRANSPARENT));
    assert_eq!(f.fb.pixel(3, 0), Some(RED));
}

#[test]
fn run_collection_merges_contiguous_spans() {
    let mut runs: Vec<PixelRun> = Vec::new();
    runs.span(1, 1, 0);
    runs.span(1, 1, 3);
    runs.pixel(4, 1);
    runs.pixel(6, 1);
    runs.pixel(7, 2);
    assert_eq!(
        runs,
        vec![
            PixelRun::new(1, 1, 4),
            PixelRun::new(6, 1, 1),
            PixelRun::new(7, 2, 1),
        ]
    );
    assert_eq!(PixelRun::between(5, 5, 0), None);
    assert_eq!(PixelRun::between(2, 5, 0), Some(PixelRun::new(2, 0, 3)));
}
