//! Arcs: circle kernels restricted to an angular range.

use crate::foundation::core::{PixelRect, Point, saturate_i32};
use crate::foundation::math::{ARC_CENTER_CORRECTION, ARC_RADIUS_INSET, AngleRange};
use crate::raster::compositor::{Compositor, Ink, PixelRun, SpanSink};
use crate::raster::pixel_set::PixelSet;
use crate::shapes::circle::{Anchors, draw_dot};
use crate::shapes::model::ArcShape;

/// Pie slice: pixels with `dist² <= (radius - inset)²` whose direction is in `range`.
///
/// `origin` is the center in pixel-index space, see [`origin`].
pub(crate) fn fill_into(
    origin: Point,
    radius: f64,
    range: AngleRange,
    limit: PixelRect,
    sink: &mut impl SpanSink,
) {
    let r = radius - ARC_RADIUS_INSET;
    if r < 0.0 {
        return;
    }
    let r2 = r * r;
    let (ccx, ccy) = (origin.x, origin.y);
    let y0 = saturate_i32((ccy - r).ceil()).max(limit.y0);
    let y1 = saturate_i32((ccy + r).floor()).min(limit.y1 - 1);
    for py in y0..=y1 {
        let dy = f64::from(py) - ccy;
        let dy2 = dy * dy;
        if dy2 > r2 {
            continue;
        }
        let half = (r2 - dy2).sqrt();
        let x0 = saturate_i32((ccx - half).ceil()).max(limit.x0);
        let x1 = saturate_i32((ccx + half).floor()).min(limit.x1 - 1);
        if x1 < x0 {
            continue;
        }
        if range.is_full() {
            sink.span(x0, py, (x1 - x0 + 1) as u32);
            continue;
        }
        for px in x0..=x1 {
            let dx = f64::from(px) - ccx;
            if dx * dx + dy2 <= r2 && range.contains_vector(dx, dy) {
                sink.pixel(px, py);
            }
        }
    }
}

/// Midpoint outline pixels inside `range`, each grown into a `stroke_width` square
/// clipped to `limit`.
pub(crate) fn stroke_into(
    origin: Point,
    radius: f64,
    stroke_width: f64,
    range: AngleRange,
    limit: PixelRect,
    sink: &mut impl SpanSink,
) {
    let anchors = Anchors::at_origin(origin, radius);
    let (ccx, ccy) = (origin.x, origin.y);
    let side = saturate_i32(stroke_width.round()).max(1);
    let offset = side / 2;
    anchors.outline(|x, y| {
        if !range.contains_vector(f64::from(x) - ccx, f64::from(y) - ccy) {
            return;
        }
        let (x0, y0) = (x.saturating_sub(offset), y.saturating_sub(offset));
        let square = PixelRect::new(x0, y0, x0.saturating_add(side), y0.saturating_add(side));
        for (sx, sy, len) in square.intersect(limit).rows() {
            sink.span(sx, sy, len);
        }
    });
}

/// Bounds large enough for the grown outline of an arc.
pub(crate) fn stroke_bounds(origin: Point, radius: f64, stroke_width: f64) -> PixelRect {
    let pad = (saturate_i32(stroke_width.round()).max(1) / 2).saturating_add(1);
    Anchors::at_origin(origin, radius).bounds(pad)
}

/// Arc center in pixel-index space.
pub(crate) fn origin(center: Point) -> Point {
    Point::new(center.x + ARC_CENTER_CORRECTION, center.y + ARC_CENTER_CORRECTION)
}

pub(crate) fn draw(comp: &mut Compositor<'_>, arc: &ArcShape) {
    let c = &arc.circle;
    if c.radius.is_nan() || c.radius < 0.0 {
        return;
    }
    if c.radius == 0.0 {
        draw_dot(comp, c);
        return;
    }
    let range = AngleRange::from_degrees(arc.start_angle_deg, arc.end_angle_deg);
    let limit = comp.bounds();
    let o = origin(c.center);
    if c.clipping_only {
        fill_into(o, c.radius, range, limit, &mut comp.brush(Ink::Clip));
        return;
    }
    if let Some(fill) = c.fill_color {
        let mut runs: Vec<PixelRun> = Vec::new();
        fill_into(o, c.radius, range, limit, &mut runs);
        comp.set_pixel_runs(&runs, fill);
    }
    if let Some(color) = c.stroke() {
        let bounds = stroke_bounds(o, c.radius, c.stroke_width).intersect(limit);
        let mut set = PixelSet::new(bounds);
        stroke_into(o, c.radius, c.stroke_width, range, limit, &mut set);
        set.paint(comp, Ink::Paint(color));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/arc.rs"]
mod tests;
