use crate::foundation::core::{PixelRect, Rgba8};
use crate::raster::clip_mask::ClipMask;
use crate::raster::framebuffer::Framebuffer;

/// Horizontal span `[x, x + len)` on row `y`; the unit of batched compositing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRun {
    pub x: i32,
    pub y: i32,
    pub len: u32,
}

impl PixelRun {
    pub fn new(x: i32, y: i32, len: u32) -> Self {
        Self { x, y, len }
    }

    /// Run covering `[x0, x1)`; `None` when empty.
    pub fn between(x0: i32, x1: i32, y: i32) -> Option<Self> {
        (x1 > x0).then(|| Self::new(x0, y, (i64::from(x1) - i64::from(x0)) as u32))
    }
}

/// What a run does to the pixels it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    /// Source-over composite of a color, scaled by the global alpha.
    Paint(Rgba8),
    /// Mark pixels in the scratch clip accumulator instead of the framebuffer.
    Clip,
    /// Write fully transparent pixels (`clearRect`).
    Erase,
}

/// Receiver of horizontal spans produced by scan conversion.
pub trait SpanSink {
    fn span(&mut self, x: i32, y: i32, len: u32);

    fn pixel(&mut self, x: i32, y: i32) {
        self.span(x, y, 1);
    }
}

/// Writes pixels into a framebuffer through the current clip and global alpha.
pub struct Compositor<'a> {
    fb: &'a mut Framebuffer,
    clip: Option<&'a ClipMask>,
    scratch: &'a mut ClipMask,
    global_alpha: f64,
}

impl<'a> Compositor<'a> {
    /// `clip` is ignored while fully visible so unclipped draws skip mask tests.
    pub fn new(
        fb: &'a mut Framebuffer,
        clip: &'a ClipMask,
        scratch: &'a mut ClipMask,
        global_alpha: f64,
    ) -> Self {
        Self {
            fb,
            clip: (!clip.is_all_visible()).then_some(clip),
            scratch,
            global_alpha: global_alpha.clamp(0.0, 1.0),
        }
    }

    pub fn width(&self) -> u32 {
        self.fb.width()
    }

    pub fn height(&self) -> u32 {
        self.fb.height()
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.fb.width() as i32, self.fb.height() as i32)
    }

    pub fn global_alpha(&self) -> f64 {
        self.global_alpha
    }

    /// Whether painting `color` replaces destination pixels outright.
    pub fn is_direct_write(&self, color: Rgba8) -> bool {
        color.is_opaque() && self.global_alpha >= 1.0
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba8) {
        self.apply_run(PixelRun::new(x, y, 1), Ink::Paint(color));
    }

    pub fn set_pixel_runs(&mut self, runs: &[PixelRun], color: Rgba8) {
        self.apply_runs(runs, Ink::Paint(color));
    }

    pub fn clip_pixel(&mut self, x: i32, y: i32) {
        self.apply_run(PixelRun::new(x, y, 1), Ink::Clip);
    }

    pub fn apply_runs(&mut self, runs: &[PixelRun], ink: Ink) {
        for &run in runs {
            self.apply_run(run, ink);
        }
    }

    pub fn apply_run(&mut self, run: PixelRun, ink: Ink) {
        let Some((x0, x1)) = self.clamp_run(run) else {
            return;
        };
        match ink {
            Ink::Clip => {
                let start = self.scratch.bit_index(x0, run.y);
                self.scratch.set_bit_range(start, (x1 - x0) as usize);
            }
            Ink::Erase => self.visit_visible(run.y, x0, x1, |seg| seg.fill(0)),
            Ink::Paint(color) => {
                let ga = self.global_alpha;
                if color.a == 0 || ga <= 0.0 {
                    return;
                }
                if self.is_direct_write(color) {
                    let packed = color.to_packed();
                    self.visit_visible(run.y, x0, x1, |seg| seg.fill(packed));
                } else {
                    self.visit_visible(run.y, x0, x1, |seg| {
                        for w in seg {
                            *w = blend_over(*w, color, ga);
                        }
                    });
                }
            }
        }
    }

    /// Brush that routes spans through `apply_run` with a fixed ink.
    pub fn brush(&mut self, ink: Ink) -> Brush<'_, 'a> {
        Brush { comp: self, ink }
    }

    fn clamp_run(&self, run: PixelRun) -> Option<(i32, i32)> {
        if run.len == 0 || run.y < 0 || run.y as u32 >= self.fb.height() {
            return None;
        }
        let x0 = i64::from(run.x).max(0);
        let x1 = (i64::from(run.x) + i64::from(run.len)).min(i64::from(self.fb.width()));
        (x1 > x0).then_some((x0 as i32, x1 as i32))
    }

    /// Call `op` on each maximal visible segment of `[x0, x1)` on row `y`.
    ///
    /// With a clip mask, aligned all-zero bytes skip 8 pixels and all-one bytes extend
    /// the current segment by 8 without per-bit tests.
    fn visit_visible(&mut self, y: i32, x0: i32, x1: i32, mut op: impl FnMut(&mut [u32])) {
        let row = self.fb.index(0, y);
        let words = self.fb.words_mut();
        let Some(mask) = self.clip else {
            op(&mut words[row + x0 as usize..row + x1 as usize]);
            return;
        };

        let mut seg_start: Option<usize> = None;
        let mut x = x0 as usize;
        let end = x1 as usize;
        while x < end {
            let bit = row + x;
            if bit & 7 == 0 && x + 8 <= end {
                match mask.byte(bit) {
                    0 => {
                        if let Some(s) = seg_start.take() {
                            op(&mut words[row + s..row + x]);
                        }
                        x += 8;
                        continue;
                    }
                    0xFF => {
                        seg_start.get_or_insert(x);
                        x += 8;
                        continue;
                    }
                    _ => {}
                }
            }
            let visible = mask.byte(bit) != 0 && mask.bit(bit);
            if visible {
                seg_start.get_or_insert(x);
            } else if let Some(s) = seg_start.take() {
                op(&mut words[row + s..row + x]);
            }
            x += 1;
        }
        if let Some(s) = seg_start {
            op(&mut words[row + s..row + end]);
        }
    }
}

/// [`SpanSink`] that paints, clips or erases through a [`Compositor`].
pub struct Brush<'c, 'a> {
    comp: &'c mut Compositor<'a>,
    ink: Ink,
}

impl SpanSink for Brush<'_, '_> {
    fn span(&mut self, x: i32, y: i32, len: u32) {
        self.comp.apply_run(PixelRun::new(x, y, len), self.ink);
    }
}

/// Collects spans, extending the previous run when the new span continues it.
impl SpanSink for Vec<PixelRun> {
    fn span(&mut self, x: i32, y: i32, len: u32) {
        if len == 0 {
            return;
        }
        if let Some(last) = self.last_mut()
            && last.y == y
            && i64::from(last.x) + i64::from(last.len) == i64::from(x)
        {
            last.len += len;
            return;
        }
        self.push(PixelRun::new(x, y, len));
    }
}

/// Porter-Duff source-over of a straight-alpha color onto a packed destination word.
pub fn blend_over(dst: u32, src: Rgba8, global_alpha: f64) -> u32 {
    let incoming = f64::from(src.a) / 255.0 * global_alpha;
    let d = Rgba8::from_packed(dst);
    let old = f64::from(d.a) / 255.0;
    let keep = old * (1.0 - incoming);
    let new_alpha = incoming + keep;
    if new_alpha <= 0.0 {
        return dst;
    }
    let channel = |s: u8, d: u8| -> u8 {
        ((f64::from(s) * incoming + f64::from(d) * keep) / new_alpha)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba8 {
        r: channel(src.r, d.r),
        g: channel(src.g, d.g),
        b: channel(src.b, d.b),
        a: (new_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    }
    .to_packed()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/compositor.rs"]
mod tests;
