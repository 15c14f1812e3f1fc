//! Line rasterization: Bresenham for hairlines, bands and quads for thick lines.

use crate::foundation::core::{PixelRect, Point, Vec2, saturate_i32};
use crate::foundation::math::round_px;
use crate::raster::compositor::{Compositor, Ink, PixelRun, SpanSink};
use crate::raster::edge::Quad;
use crate::shapes::model::Line;

/// `end` pushed further away from `start` by `amount`.
pub fn extend_line(start: Point, end: Point, amount: f64) -> Point {
    let d = end - start;
    let len = d.hypot();
    if len <= 0.0 {
        return end;
    }
    end + d * (amount / len)
}

/// `end` pulled back toward `start` by `amount`.
pub fn shorten_line(start: Point, end: Point, amount: f64) -> Point {
    extend_line(start, end, -amount)
}

/// The rectangle swept by a butt-capped segment of the given thickness.
pub fn segment_quad(start: Point, end: Point, thickness: f64) -> Option<Quad> {
    let d = end - start;
    let len = d.hypot();
    if len <= 0.0 || thickness <= 0.0 {
        return None;
    }
    let n = Vec2::new(-d.y, d.x) * (thickness * 0.5 / len);
    Some(Quad::new([start + n, end + n, end - n, start - n]))
}

pub(crate) fn draw(comp: &mut Compositor<'_>, line: &Line) {
    let ink = Ink::Paint(line.color);
    let limit = comp.bounds();
    let mut runs: Vec<PixelRun> = Vec::new();
    spans_into(line, limit, &mut runs);
    comp.apply_runs(&runs, ink);
}

/// Scan-convert `line` into `sink`, one visit per pixel.
pub(crate) fn spans_into(line: &Line, limit: PixelRect, sink: &mut impl SpanSink) {
    let (p0, p1) = (line.start, line.end);
    let t = line.thickness;
    let horizontal = p0.y == p1.y;
    let vertical = p0.x == p1.x;

    if t <= 1.0 {
        if horizontal && vertical {
            return;
        }
        // Exact axis matches are half-open: the far pixel is not drawn.
        if horizontal {
            let y = floor_px(p0.y);
            if y >= limit.y0 && y < limit.y1 {
                let (a, b) = ordered(p0.x, p1.x);
                emit_h(sink, limit, floor_px(a), floor_px(b), y);
            }
            return;
        }
        if vertical {
            let x = floor_px(p0.x);
            if x >= limit.x0 && x < limit.x1 {
                let (a, b) = ordered(p0.y, p1.y);
                for y in floor_px(a).max(limit.y0)..floor_px(b).min(limit.y1) {
                    sink.pixel(x, y);
                }
            }
            return;
        }
        bresenham(
            floor_px(p0.x),
            floor_px(p0.y),
            floor_px(p1.x),
            floor_px(p1.y),
            limit,
            sink,
        );
        return;
    }

    let half = t * 0.5;
    if horizontal {
        let (a, b) = ordered(p0.x, p1.x);
        let (x0, x1) = (round_px(a), round_px(b));
        for y in round_px(p0.y - half).max(limit.y0)..round_px(p0.y + half).min(limit.y1) {
            emit_h(sink, limit, x0, x1, y);
        }
        return;
    }
    if vertical {
        let x0 = round_px(p0.x - half);
        let x1 = round_px(p0.x + half);
        let (a, b) = ordered(p0.y, p1.y);
        for y in round_px(a).max(limit.y0)..round_px(b).min(limit.y1) {
            emit_h(sink, limit, x0, x1, y);
        }
        return;
    }
    if let Some(quad) = segment_quad(p0, p1, t) {
        quad.scan(limit, sink);
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

fn floor_px(v: f64) -> i32 {
    saturate_i32(v.floor())
}

fn emit_h(sink: &mut impl SpanSink, limit: PixelRect, x0: i32, x1: i32, y: i32) {
    let (x0, x1) = (x0.max(limit.x0), x1.min(limit.x1));
    if x1 > x0 {
        sink.span(x0, y, (x1 - x0) as u32);
    }
}

fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32, limit: PixelRect, sink: &mut impl SpanSink) {
    let (x1, y1) = (i64::from(x1), i64::from(y1));
    let (mut x, mut y) = (i64::from(x0), i64::from(y0));
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        if limit.contains(x as i32, y as i32) {
            sink.pixel(x as i32, y as i32);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/line.rs"]
mod tests;
