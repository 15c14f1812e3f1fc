//! Rounded rectangles.
//!
//! The axis-aligned path needs whole-pixel sizes so the straight edges stay crisp; it
//! paints the fill row by row and picks one of two stroke strategies. Rotated rounded
//! rects are assembled from rect, segment and arc pieces.

use crate::foundation::core::{PixelRect, Point, Rgba8, Vec2, saturate_i32};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::{
    ARC_RADIUS_INSET, AngleRange, CENTER_CORRECTION, THIN_STROKE_MAX_WIDTH, deg_to_rad,
    is_integral, rad_to_deg, round_px,
};
use crate::raster::compositor::{Compositor, Ink, PixelRun, SpanSink};
use crate::raster::edge::Quad;
use crate::raster::pixel_set::PixelSet;
use crate::shapes::QualityLog;
use crate::shapes::model::RoundRectShape;
use crate::shapes::rect::{AlignedRect, axis_alignment, corners, rotated_stroke_into};
use crate::shapes::{arc, line};

/// Corner radius clamped into `[0, min(w, h) / 2]`.
pub fn clamp_radius(radius: f64, width: f64, height: f64) -> f64 {
    let max = (width.min(height) * 0.5).max(0.0);
    if radius.is_nan() {
        return 0.0;
    }
    radius.clamp(0.0, max)
}

/// Grid-snapped rounded rectangle: integer origin and size, continuous radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RoundedBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub radius: f64,
}

impl RoundedBox {
    fn left(&self) -> f64 {
        f64::from(self.x)
    }

    fn top(&self) -> f64 {
        f64::from(self.y)
    }

    fn right(&self) -> f64 {
        f64::from(self.x) + f64::from(self.w)
    }

    fn bottom(&self) -> f64 {
        f64::from(self.y) + f64::from(self.h)
    }

    /// Corner circle centers: `(left, right, top, bottom)` coordinates.
    fn corner_centers(&self) -> (f64, f64, f64, f64) {
        let r = self.radius;
        (
            self.left() + r,
            self.right() - r,
            self.top() + r,
            self.bottom() - r,
        )
    }

    pub(crate) fn fill_into(&self, limit: PixelRect, sink: &mut impl SpanSink) {
        let (cl, cr, ct, cb) = self.corner_centers();
        let r = self.radius;
        let area = PixelRect::new(self.x, self.y, self.x + self.w, self.y + self.h).intersect(limit);
        for py in area.y0..area.y1 {
            let yc = f64::from(py) + 0.5;
            let (x0, x1) = if yc >= ct && yc <= cb {
                (self.x, self.x + self.w - 1)
            } else {
                let dy = if yc < ct { ct - yc } else { yc - cb };
                if dy > r {
                    continue;
                }
                let half = (r * r - dy * dy).sqrt();
                (
                    saturate_i32((cl - half - 0.5).ceil()),
                    saturate_i32((cr + half - 0.5).floor()),
                )
            };
            let (x0, x1) = (x0.max(area.x0), x1.min(area.x1 - 1));
            if x1 >= x0 {
                sink.span(x0, py, (x1 - x0 + 1) as u32);
            }
        }
    }

    /// Pixel thresholds where the straight edges give way to the corners.
    fn straight_limits(&self) -> (i32, i32, i32, i32) {
        let (cl, cr, ct, cb) = self.corner_centers();
        (round_px(cl), round_px(cr), round_px(ct), round_px(cb))
    }

    /// Straight parts of the stroke: four bands of `stroke_width` centered on the edges,
    /// stopping where the corners begin.
    fn edge_bands_into(&self, stroke_width: f64, limit: PixelRect, sink: &mut impl SpanSink) {
        let half = stroke_width * 0.5;
        let (xl, xr, yt, yb) = self.straight_limits();
        let (top0, top1) = band_across(self.top(), half);
        let (bottom0, bottom1) = band_across(self.bottom(), half);
        let (left0, left1) = band_across(self.left(), half);
        let (right0, right1) = band_across(self.right(), half);
        let bands = [
            PixelRect::new(xl, top0, xr, top1),
            PixelRect::new(xl, bottom0, xr, bottom1),
            PixelRect::new(left0, yt, left1, yb),
            PixelRect::new(right0, yt, right1, yb),
        ];
        for band in bands {
            for (x, y, len) in band.intersect(limit).rows() {
                sink.span(x, y, len);
            }
        }
    }

    /// Corner arcs sampled once per degree, each sample a stroke-width square.
    fn corner_samples_into(&self, stroke_width: f64, limit: PixelRect, sink: &mut impl SpanSink) {
        let half = stroke_width * 0.5;
        let (cl, cr, ct, cb) = self.corner_centers();
        let corners = [(cr, cb, 0), (cl, cb, 90), (cl, ct, 180), (cr, ct, 270)];
        for (cx, cy, start) in corners {
            for deg in start..=start + 90 {
                let (sin, cos) = deg_to_rad(f64::from(deg)).sin_cos();
                let p = Point::new(cx + self.radius * cos, cy + self.radius * sin);
                let (x0, x1) = band_across(p.x, half);
                let (y0, y1) = band_across(p.y, half);
                for (x, y, len) in PixelRect::new(x0, y0, x1, y1).intersect(limit).rows() {
                    sink.span(x, y, len);
                }
            }
        }
    }

    /// Corner annuli as one span per row, so no angular gaps are left between samples.
    fn corner_spans_into(&self, stroke_width: f64, limit: PixelRect, sink: &mut impl SpanSink) {
        let half = stroke_width * 0.5;
        let outer = self.radius + half;
        let inner = (self.radius - half).max(0.0);
        let (cl, cr, ct, cb) = self.corner_centers();
        let (xl, xr, yt, yb) = self.straight_limits();

        let top_rows = saturate_i32((ct - outer - 0.5).ceil()).max(limit.y0)..yt.min(limit.y1);
        let bottom_rows =
            yb.max(limit.y0)..(saturate_i32((cb + outer - 0.5).floor()) + 1).min(limit.y1);
        let rows = top_rows
            .map(|py| (py, ct))
            .chain(bottom_rows.map(|py| (py, cb)));
        for (py, cy) in rows {
            let dy = f64::from(py) + 0.5 - cy;
            let dy2 = dy * dy;
            if dy2 > outer * outer {
                continue;
            }
            let xo = (outer * outer - dy2).sqrt();
            let xi = (inner * inner - dy2).max(0.0).sqrt();
            let spans = [
                (
                    saturate_i32((cl - xo - 0.5).ceil()),
                    saturate_i32((cl - xi - 0.5).floor()).min(xl - 1),
                ),
                (
                    saturate_i32((cr + xi - 0.5).ceil()).max(xr),
                    saturate_i32((cr + xo - 0.5).floor()),
                ),
            ];
            for (x0, x1) in spans {
                let (x0, x1) = (x0.max(limit.x0), x1.min(limit.x1 - 1));
                if x1 >= x0 {
                    sink.span(x0, py, (x1 - x0 + 1) as u32);
                }
            }
        }
    }

    fn as_aligned_rect(&self) -> AlignedRect {
        AlignedRect::new(
            Point::new(
                self.left() + f64::from(self.w) * 0.5,
                self.top() + f64::from(self.h) * 0.5,
            ),
            f64::from(self.w),
            f64::from(self.h),
        )
    }

    fn stroke_bounds(&self, stroke_width: f64) -> PixelRect {
        let pad = saturate_i32((stroke_width * 0.5).ceil()).saturating_add(1);
        PixelRect::new(
            self.x,
            self.y,
            self.x.saturating_add(self.w),
            self.y.saturating_add(self.h),
        )
        .grow(pad)
    }
}

/// Pixel range `[lo, hi)` of a band `half` either side of `edge`, at least one pixel.
fn band_across(edge: f64, half: f64) -> (i32, i32) {
    let lo = round_px(edge - half);
    (lo, round_px(edge + half).max(lo.saturating_add(1)))
}

pub(crate) fn draw(
    comp: &mut Compositor<'_>,
    shape: &RoundRectShape,
    log: &mut QualityLog,
) -> CanvasResult<()> {
    match axis_alignment(shape.rect.rotation_rad) {
        Some(swap) => draw_aligned(comp, shape, swap, log),
        None => {
            draw_rotated(comp, shape);
            Ok(())
        }
    }
}

fn draw_aligned(
    comp: &mut Compositor<'_>,
    shape: &RoundRectShape,
    swap: bool,
    log: &mut QualityLog,
) -> CanvasResult<()> {
    let rect = &shape.rect;
    let (w, h) = if swap {
        (rect.height, rect.width)
    } else {
        (rect.width, rect.height)
    };
    if !is_integral(w) || !is_integral(h) {
        return Err(CanvasError::validation(format!(
            "rounded rect size must be whole pixels on the crisp path, got {w}x{h}"
        )));
    }
    let left = rect.center.x - w * 0.5;
    let top = rect.center.y - h * 0.5;
    if !is_integral(left) || !is_integral(top) {
        log.misaligned("round_rect", left, top, w, h);
    }
    let geom = RoundedBox {
        x: round_px(left),
        y: round_px(top),
        w: saturate_i32(w.round()).max(0),
        h: saturate_i32(h.round()).max(0),
        radius: clamp_radius(shape.corner_radius, w.abs(), h.abs()),
    };
    let limit = comp.bounds();

    if rect.clipping_only {
        geom.fill_into(limit, &mut comp.brush(Ink::Clip));
        return Ok(());
    }
    if let Some(fill) = rect.fill_color {
        let mut runs: Vec<PixelRun> = Vec::new();
        geom.fill_into(limit, &mut runs);
        comp.set_pixel_runs(&runs, fill);
    }
    if let Some(color) = rect.stroke() {
        stroke_aligned(comp, &geom, rect.stroke_width, color);
    }
    Ok(())
}

fn stroke_aligned(comp: &mut Compositor<'_>, geom: &RoundedBox, width: f64, color: Rgba8) {
    let limit = comp.bounds();
    if geom.radius < 0.5 {
        let mut runs: Vec<PixelRun> = Vec::new();
        geom.as_aligned_rect().stroke_into(width, limit, &mut runs);
        comp.set_pixel_runs(&runs, color);
        return;
    }
    let thin = width < THIN_STROKE_MAX_WIDTH && comp.is_direct_write(color);
    tracing::debug!(width, radius = geom.radius, thin, "rounded rect stroke");
    if thin {
        let mut brush = comp.brush(Ink::Paint(color));
        geom.edge_bands_into(width, limit, &mut brush);
        geom.corner_samples_into(width, limit, &mut brush);
        return;
    }
    let mut set = PixelSet::new(geom.stroke_bounds(width).intersect(limit));
    geom.edge_bands_into(width, limit, &mut set);
    geom.corner_spans_into(width, limit, &mut set);
    set.paint(comp, Ink::Paint(color));
}

/// Local frame of a rotated box: `to_world(lx, ly)` maps box-relative offsets.
struct Frame {
    center: Point,
    ux: Vec2,
    uy: Vec2,
    rotation_deg: f64,
}

impl Frame {
    fn new(center: Point, rotation: f64) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self {
            center,
            ux: Vec2::new(cos, sin),
            uy: Vec2::new(-sin, cos),
            rotation_deg: rad_to_deg(rotation),
        }
    }

    fn to_world(&self, lx: f64, ly: f64) -> Point {
        self.center + self.ux * lx + self.uy * ly
    }

    fn quad(&self, lx: f64, ly: f64, w: f64, h: f64) -> Quad {
        let (hw, hh) = (w * 0.5, h * 0.5);
        Quad::new([
            self.to_world(lx - hw, ly - hh),
            self.to_world(lx + hw, ly - hh),
            self.to_world(lx + hw, ly + hh),
            self.to_world(lx - hw, ly + hh),
        ])
    }

    /// Corner circle centers in pixel-index space, with the local start angle of each
    /// quarter, clockwise from the bottom-right corner.
    ///
    /// Corners take the circle placement rather than the arc one so they meet the band
    /// quads, which sample pixel centers.
    fn corner_arcs(&self, ix: f64, iy: f64) -> [(Point, f64); 4] {
        let index = |p: Point| Point::new(p.x + CENTER_CORRECTION, p.y + CENTER_CORRECTION);
        [
            (index(self.to_world(ix, iy)), 0.0),
            (index(self.to_world(-ix, iy)), 90.0),
            (index(self.to_world(-ix, -iy)), 180.0),
            (index(self.to_world(ix, -iy)), 270.0),
        ]
    }

    fn quarter(&self, start: f64) -> AngleRange {
        let s = start + self.rotation_deg;
        AngleRange::from_degrees(s, s + 90.0)
    }
}

fn draw_rotated(comp: &mut Compositor<'_>, shape: &RoundRectShape) {
    let rect = &shape.rect;
    let (w, h) = (rect.width.abs(), rect.height.abs());
    let r = clamp_radius(shape.corner_radius, w, h);
    let frame = Frame::new(rect.center, rect.rotation_rad);
    let limit = comp.bounds();
    let outer = corners(rect.center, w, h, rect.rotation_rad);
    let half = if rect.stroke().is_some() {
        rect.stroke_width * 0.5
    } else {
        0.0
    };
    let pad = saturate_i32(half.ceil()).saturating_add(2);
    let bounds = Quad::new(outer).bounds().grow(pad).intersect(limit);
    let (ix, iy) = (w * 0.5 - r, h * 0.5 - r);

    let fill_ink = if rect.clipping_only {
        Some(Ink::Clip)
    } else {
        rect.fill_color.map(Ink::Paint)
    };
    if let Some(ink) = fill_ink {
        let mut set = PixelSet::new(bounds);
        frame.quad(0.0, 0.0, w - 2.0 * r, h - 2.0 * r).scan(limit, &mut set);
        if r > 0.0 {
            let (band_y, band_x) = (iy + r * 0.5, ix + r * 0.5);
            for sign in [-1.0, 1.0] {
                frame.quad(0.0, sign * band_y, w - 2.0 * r, r).scan(limit, &mut set);
                frame.quad(sign * band_x, 0.0, r, h - 2.0 * r).scan(limit, &mut set);
            }
            for (center, start) in frame.corner_arcs(ix, iy) {
                let range = frame.quarter(start);
                arc::fill_into(center, r + ARC_RADIUS_INSET, range, limit, &mut set);
            }
        }
        set.paint(comp, ink);
    }
    if rect.clipping_only {
        return;
    }

    let Some(color) = rect.stroke() else {
        return;
    };
    let mut set = PixelSet::new(bounds);
    if r < 0.5 {
        rotated_stroke_into(outer, rect.stroke_width, limit, &mut set);
    } else {
        let edges = [
            ((-ix, -h * 0.5), (ix, -h * 0.5)),
            ((w * 0.5, -iy), (w * 0.5, iy)),
            ((ix, h * 0.5), (-ix, h * 0.5)),
            ((-w * 0.5, iy), (-w * 0.5, -iy)),
        ];
        for ((ax, ay), (bx, by)) in edges {
            let (a, b) = (frame.to_world(ax, ay), frame.to_world(bx, by));
            if let Some(q) = line::segment_quad(a, b, rect.stroke_width) {
                q.scan(limit, &mut set);
            }
        }
        for (center, start) in frame.corner_arcs(ix, iy) {
            arc::stroke_into(center, r, rect.stroke_width, frame.quarter(start), limit, &mut set);
        }
    }
    set.paint(comp, Ink::Paint(color));
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/round_rect.rs"]
mod tests;
