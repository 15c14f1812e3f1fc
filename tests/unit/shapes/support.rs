//! Shared fixture for rasterizer unit tests.

use std::collections::BTreeSet;

use crate::foundation::core::Rgba8;
use crate::raster::clip_mask::ClipMask;
use crate::raster::compositor::Compositor;
use crate::raster::framebuffer::Framebuffer;
use crate::shapes::QualityLog;

pub(crate) struct Canvas {
    pub fb: Framebuffer,
    pub clip: ClipMask,
    pub scratch: ClipMask,
    pub log: QualityLog,
}

impl Canvas {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            fb: Framebuffer::new(w, h).unwrap(),
            clip: ClipMask::new(w, h),
            scratch: ClipMask::new_clipped(w, h),
            log: QualityLog::new(true),
        }
    }

    pub fn comp(&mut self, alpha: f64) -> Compositor<'_> {
        Compositor::new(&mut self.fb, &self.clip, &mut self.scratch, alpha)
    }

    /// Compositor plus the quality log, borrowed together.
    pub fn parts(&mut self, alpha: f64) -> (Compositor<'_>, &mut QualityLog) {
        (
            Compositor::new(&mut self.fb, &self.clip, &mut self.scratch, alpha),
            &mut self.log,
        )
    }

    pub fn painted(&self) -> BTreeSet<(i32, i32)> {
        let mut out = BTreeSet::new();
        for y in 0..self.fb.height() as i32 {
            for x in 0..self.fb.width() as i32 {
                if self.fb.pixel(x, y).is_some_and(|p| p.a != 0) {
                    out.insert((x, y));
                }
            }
        }
        out
    }

    pub fn at(&self, x: i32, y: i32) -> Rgba8 {
        self.fb.pixel(x, y).unwrap()
    }

    pub fn scratch_set(&self) -> BTreeSet<(i32, i32)> {
        let mut out = BTreeSet::new();
        for y in 0..self.scratch.height() as i32 {
            for x in 0..self.scratch.width() as i32 {
                if self.scratch.is_visible(x, y) {
                    out.insert((x, y));
                }
            }
        }
        out
    }
}

pub(crate) fn rect_set(x0: i32, y0: i32, x1: i32, y1: i32) -> BTreeSet<(i32, i32)> {
    (y0..y1).flat_map(|y| (x0..x1).map(move |x| (x, y))).collect()
}
