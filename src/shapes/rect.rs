//! Rectangle rasterization.
//!
//! Near-axis-aligned rectangles snap to the pixel grid and are emitted as row runs, so
//! their edges are crisp. Anything else goes through the edge-function quad scan, which
//! also backs clip accumulation and `clearRect` for rotated geometry.

use std::f64::consts::FRAC_PI_2;

use crate::foundation::core::{PixelRect, Point, Rgba8, Vec2, saturate_i32};
use crate::foundation::math::{AXIS_ALIGN_TOLERANCE_RAD, is_integral, round_px};
use crate::raster::compositor::{Compositor, Ink, PixelRun, SpanSink};
use crate::raster::edge::Quad;
use crate::raster::pixel_set::PixelSet;
use crate::shapes::QualityLog;
use crate::shapes::line::{extend_line, segment_quad, shorten_line};
use crate::shapes::model::RectShape;

/// `Some(swap_axes)` when `rotation` is close enough to a multiple of 90 degrees.
pub fn axis_alignment(rotation: f64) -> Option<bool> {
    let quarter = (rotation / FRAC_PI_2).round();
    if (rotation - quarter * FRAC_PI_2).abs() > AXIS_ALIGN_TOLERANCE_RAD {
        return None;
    }
    Some((quarter as i64).rem_euclid(2) == 1)
}

/// Grid-snapped axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct AlignedRect {
    /// Unsnapped edges.
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Snapped fill area.
    pub px: PixelRect,
}

impl AlignedRect {
    pub(crate) fn new(center: Point, width: f64, height: f64) -> Self {
        let left = center.x - width * 0.5;
        let top = center.y - height * 0.5;
        let x = round_px(left);
        let y = round_px(top);
        let w = round_px(width).max(0);
        let h = round_px(height).max(0);
        Self {
            left,
            top,
            width,
            height,
            px: PixelRect::new(x, y, x.saturating_add(w), y.saturating_add(h)),
        }
    }

    pub(crate) fn is_grid_aligned(&self) -> bool {
        is_integral(self.left)
            && is_integral(self.top)
            && is_integral(self.width)
            && is_integral(self.height)
    }

    pub(crate) fn fill_into(&self, limit: PixelRect, sink: &mut impl SpanSink) {
        for (x, y, len) in self.px.intersect(limit).rows() {
            sink.span(x, y, len);
        }
    }

    /// Four non-overlapping bands straddling the edges by `stroke_width / 2` each way.
    pub(crate) fn stroke_into(&self, stroke_width: f64, limit: PixelRect, sink: &mut impl SpanSink) {
        let half = stroke_width * 0.5;
        let (l, t) = (self.left, self.top);
        let (r, b) = (l + self.width, t + self.height);

        let (ox0, ox1) = (round_px(l - half), round_px(r + half));
        let (oy0, oy1) = (round_px(t - half), round_px(b + half));
        let (ix0, ix1) = (round_px(l + half), round_px(r - half));
        let (iy0, iy1) = (round_px(t + half), round_px(b - half));

        let mut band = |x0: i32, x1: i32, y0: i32, y1: i32| {
            PixelRect::new(x0, y0, x1, y1)
                .intersect(limit)
                .rows()
                .for_each(|(x, y, len)| sink.span(x, y, len));
        };

        if iy0 >= iy1 || ix0 >= ix1 {
            // Stroke swallows the interior.
            band(ox0, ox1, oy0, oy1);
            return;
        }
        let top_end = iy0.min(oy1);
        let bottom_start = iy1.max(top_end);
        band(ox0, ox1, oy0, top_end);
        band(ox0, ox1, bottom_start, oy1);
        band(ox0, ix0.min(ox1), top_end, bottom_start);
        band(ix1.max(ix0.min(ox1)), ox1, top_end, bottom_start);
    }
}

/// Corners of the rectangle in drawing order (top-left, top-right, bottom-right,
/// bottom-left before rotation).
pub fn corners(center: Point, width: f64, height: f64, rotation: f64) -> [Point; 4] {
    let (sin, cos) = rotation.sin_cos();
    let ux = Vec2::new(cos, sin) * (width * 0.5);
    let uy = Vec2::new(-sin, cos) * (height * 0.5);
    [
        center - ux - uy,
        center + ux - uy,
        center + ux + uy,
        center - ux + uy,
    ]
}

pub(crate) fn quad(rect: &RectShape) -> Quad {
    Quad::new(corners(rect.center, rect.width, rect.height, rect.rotation_rad))
}

/// Stroke of a rotated rectangle as four thick segments arranged as a pinwheel: each
/// segment starts `half` early and stops `half` short, so every corner square is
/// covered by exactly one segment.
pub(crate) fn rotated_stroke_into(
    corners: [Point; 4],
    stroke_width: f64,
    limit: PixelRect,
    sink: &mut impl SpanSink,
) {
    let half = stroke_width * 0.5;
    let (along, across) = (corners[1] - corners[0], corners[3] - corners[0]);
    let (len_a, len_b) = (along.hypot(), across.hypot());
    if len_a > 0.0 && len_b > 0.0 && stroke_width >= len_a.min(len_b) {
        // Stroke swallows the interior: one quad grown by `half` on every side.
        let (u, v) = (along * (half / len_a), across * (half / len_b));
        let grown = Quad::new([
            corners[0] - u - v,
            corners[1] + u - v,
            corners[2] + u + v,
            corners[3] - u + v,
        ]);
        grown.scan(limit, sink);
        return;
    }
    for i in 0..4 {
        let (a, b) = (corners[i], corners[(i + 1) % 4]);
        let start = extend_line(b, a, half);
        let end = shorten_line(a, b, half);
        if let Some(q) = segment_quad(start, end, stroke_width) {
            q.scan(limit, sink);
        }
    }
}

pub(crate) fn draw(comp: &mut Compositor<'_>, rect: &RectShape, log: &mut QualityLog) {
    match axis_alignment(rect.rotation_rad) {
        Some(swap) => draw_aligned(comp, rect, swap, log),
        None => draw_rotated(comp, rect),
    }
}

fn draw_aligned(comp: &mut Compositor<'_>, rect: &RectShape, swap: bool, log: &mut QualityLog) {
    let (w, h) = if swap {
        (rect.height, rect.width)
    } else {
        (rect.width, rect.height)
    };
    let geom = AlignedRect::new(rect.center, w, h);
    let limit = comp.bounds();

    if rect.clipping_only {
        let mut brush = comp.brush(Ink::Clip);
        geom.fill_into(limit, &mut brush);
        return;
    }

    let stroke = rect.stroke();
    let stroke_hides_edges = stroke.is_some_and(|c| comp.is_direct_write(c));
    if !stroke_hides_edges && !geom.is_grid_aligned() {
        log.misaligned("rect", geom.left, geom.top, w, h);
    }

    if let Some(fill) = rect.fill_color {
        let mut runs: Vec<PixelRun> = Vec::with_capacity(geom.px.height().max(0) as usize);
        geom.fill_into(limit, &mut runs);
        comp.set_pixel_runs(&runs, fill);
    }
    if let Some(color) = stroke {
        let mut runs: Vec<PixelRun> = Vec::new();
        geom.stroke_into(rect.stroke_width, limit, &mut runs);
        comp.set_pixel_runs(&runs, color);
    }
}

fn draw_rotated(comp: &mut Compositor<'_>, rect: &RectShape) {
    tracing::debug!(rotation = rect.rotation_rad, "rect takes the rotated path");
    let q = quad(rect);
    let limit = comp.bounds();
    if rect.clipping_only {
        q.scan(limit, &mut comp.brush(Ink::Clip));
        return;
    }
    if let Some(fill) = rect.fill_color {
        q.scan(limit, &mut comp.brush(Ink::Paint(fill)));
    }
    if let Some(color) = rect.stroke() {
        paint_rotated_stroke(comp, q.corners, rect.stroke_width, color);
    }
}

fn paint_rotated_stroke(comp: &mut Compositor<'_>, corners: [Point; 4], width: f64, color: Rgba8) {
    let limit = comp.bounds();
    if comp.is_direct_write(color) {
        rotated_stroke_into(corners, width, limit, &mut comp.brush(Ink::Paint(color)));
        return;
    }
    // Segment seams share boundary pixels; blend each pixel once.
    let pad = saturate_i32((width * 0.5).ceil()).saturating_add(1);
    let bounds = Quad::new(corners).bounds().grow(pad).intersect(limit);
    let mut set = PixelSet::new(bounds);
    rotated_stroke_into(corners, width, limit, &mut set);
    set.paint(comp, Ink::Paint(color));
}

/// `clearRect`: reset covered pixels to transparent black, honoring the clip.
pub(crate) fn clear(comp: &mut Compositor<'_>, rect: &RectShape) {
    let limit = comp.bounds();
    match axis_alignment(rect.rotation_rad) {
        Some(swap) => {
            let (w, h) = if swap {
                (rect.height, rect.width)
            } else {
                (rect.width, rect.height)
            };
            let geom = AlignedRect::new(rect.center, w, h);
            geom.fill_into(limit, &mut comp.brush(Ink::Erase));
        }
        None => quad(rect).scan(limit, &mut comp.brush(Ink::Erase)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/rect.rs"]
mod tests;
