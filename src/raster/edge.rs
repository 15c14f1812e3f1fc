//! Half-space scan conversion of convex quads.

use crate::foundation::core::{PixelRect, Point};
use crate::raster::compositor::SpanSink;

/// `a*x + b*y + c`; a point is on the inner side when the value is `>= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeFn {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl EdgeFn {
    /// Edge through `p0 -> p1` with the left-hand side (y down) positive.
    pub fn through(p0: Point, p1: Point) -> Self {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        Self {
            a: -dy,
            b: dx,
            c: dy * p0.x - dx * p0.y,
        }
    }

    pub fn eval(&self, x: f64, y: f64) -> f64 {
        self.a * x + self.b * y + self.c
    }

    fn flipped(self) -> Self {
        Self {
            a: -self.a,
            b: -self.b,
            c: -self.c,
        }
    }
}

/// Convex quadrilateral given by its corners in order (either winding).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub corners: [Point; 4],
}

impl Quad {
    pub fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Edge functions oriented so the interior is non-negative for all four.
    pub fn edges(&self) -> [EdgeFn; 4] {
        let c = &self.corners;
        let mut edges = [
            EdgeFn::through(c[0], c[1]),
            EdgeFn::through(c[1], c[2]),
            EdgeFn::through(c[2], c[3]),
            EdgeFn::through(c[3], c[0]),
        ];
        if self.signed_area() < 0.0 {
            for e in &mut edges {
                *e = e.flipped();
            }
        }
        edges
    }

    fn signed_area(&self) -> f64 {
        let c = &self.corners;
        (0..4)
            .map(|i| {
                let (p, q) = (c[i], c[(i + 1) % 4]);
                p.x * q.y - q.x * p.y
            })
            .sum::<f64>()
            * 0.5
    }

    pub fn is_degenerate(&self) -> bool {
        self.signed_area().abs() < 1e-12
    }

    pub fn bounds(&self) -> PixelRect {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in self.corners {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        PixelRect::covering(min_x, min_y, max_x, max_y)
    }

    /// Point-in-quad test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.edges().iter().all(|e| e.eval(x, y) >= 0.0)
    }

    /// Emit one span per row covering the pixels whose centers lie inside, restricted
    /// to `limit`.
    pub fn scan(&self, limit: PixelRect, sink: &mut impl SpanSink) {
        if self.is_degenerate() {
            return;
        }
        let edges = self.edges();
        let area = self.bounds().intersect(limit);
        for py in area.y0..area.y1 {
            let yc = f64::from(py) + 0.5;
            let mut lo = f64::NEG_INFINITY;
            let mut hi = f64::INFINITY;
            let mut empty = false;
            for e in &edges {
                let rest = e.b * yc + e.c;
                if e.a.abs() < 1e-12 {
                    if rest < 0.0 {
                        empty = true;
                        break;
                    }
                } else if e.a > 0.0 {
                    lo = lo.max(-rest / e.a);
                } else {
                    hi = hi.min(-rest / e.a);
                }
            }
            if empty || lo > hi {
                continue;
            }
            // Pixel centers px + 0.5 in [lo, hi].
            let x0 = ((lo - 0.5).ceil().max(f64::from(area.x0))) as i32;
            let x1 = ((hi - 0.5).floor().min(f64::from(area.x1 - 1))) as i32;
            if x1 >= x0 {
                sink.span(x0, py, (x1 - x0 + 1) as u32);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/edge.rs"]
mod tests;
