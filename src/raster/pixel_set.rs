use crate::foundation::core::PixelRect;
use crate::raster::compositor::{Compositor, Ink, PixelRun, SpanSink};

/// Dense occupancy bitmap over a shape's bounding box.
///
/// Strokes whose samples overlap (symmetric octants, arc neighborhoods, corner seams)
/// collect into a set first so every pixel is composited exactly once.
#[derive(Clone, Debug)]
pub struct PixelSet {
    bounds: PixelRect,
    stride: usize,
    bits: Vec<u64>,
    len: usize,
}

impl PixelSet {
    /// `bounds` should already be clamped to the framebuffer; inserts outside it are
    /// dropped.
    pub fn new(bounds: PixelRect) -> Self {
        let stride = bounds.width().max(0) as usize;
        let cells = stride * bounds.height().max(0) as usize;
        Self {
            bounds,
            stride,
            bits: vec![0; cells.div_ceil(64)],
            len: 0,
        }
    }

    pub fn bounds(&self) -> PixelRect {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn cell(&self, x: i32, y: i32) -> Option<usize> {
        self.bounds.contains(x, y).then(|| {
            (x - self.bounds.x0) as usize + (y - self.bounds.y0) as usize * self.stride
        })
    }

    /// Returns `true` if the pixel was newly added.
    pub fn insert(&mut self, x: i32, y: i32) -> bool {
        let Some(i) = self.cell(x, y) else {
            return false;
        };
        let (word, bit) = (i / 64, 1u64 << (i % 64));
        if self.bits[word] & bit != 0 {
            return false;
        }
        self.bits[word] |= bit;
        self.len += 1;
        true
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.cell(x, y)
            .is_some_and(|i| self.bits[i / 64] & (1u64 << (i % 64)) != 0)
    }

    /// Maximal horizontal runs of set pixels, top to bottom, left to right.
    pub fn runs(&self) -> Vec<PixelRun> {
        let mut out = Vec::new();
        for y in self.bounds.y0..self.bounds.y1 {
            let mut start: Option<i32> = None;
            for x in self.bounds.x0..self.bounds.x1 {
                match (self.contains(x, y), start) {
                    (true, None) => start = Some(x),
                    (false, Some(s)) => {
                        out.extend(PixelRun::between(s, x, y));
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(s) = start {
                out.extend(PixelRun::between(s, self.bounds.x1, y));
            }
        }
        out
    }

    /// Composite every member once.
    pub fn paint(&self, comp: &mut Compositor<'_>, ink: Ink) {
        if self.is_empty() {
            return;
        }
        comp.apply_runs(&self.runs(), ink);
    }
}

impl SpanSink for PixelSet {
    fn span(&mut self, x: i32, y: i32, len: u32) {
        if y < self.bounds.y0 || y >= self.bounds.y1 {
            return;
        }
        let x0 = x.max(self.bounds.x0);
        let x1 = (i64::from(x) + i64::from(len)).min(i64::from(self.bounds.x1)) as i32;
        for px in x0..x1 {
            self.insert(px, y);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pixel_set.rs"]
mod tests;
