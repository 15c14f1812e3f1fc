//! Circle rasterization.
//!
//! Four kernels, picked per draw:
//! 1. hairline stroke, opaque: midpoint outline written straight to the buffer
//! 2. hairline stroke, translucent: same outline deduplicated through a [`PixelSet`]
//! 3. fill only: per-row extent table from the same midpoint stepping, one run per row
//! 4. everything else: analytic per-row scan of the fill disk and the stroke annulus
//!
//! Centers are shifted by [`CENTER_CORRECTION`] so an `x.5` center lands on a pixel.

use crate::foundation::core::{PixelRect, Point, Rgba8, saturate_i32};
use crate::foundation::math::{CENTER_CORRECTION, round_px};
use crate::raster::compositor::{Compositor, Ink, PixelRun, SpanSink};
use crate::raster::pixel_set::PixelSet;
use crate::shapes::model::CircleShape;

/// Integer anchors of a midpoint circle.
///
/// Right/bottom pixels are `anchor + offset`, left/top pixels are `anchor - offset`; the
/// left/top anchors round up and the right/bottom ones round down, so the outline is an
/// exact mirror image of itself whatever the fractional center or radius.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Anchors {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
    pub radius: i32,
}

impl Anchors {
    pub(crate) fn new(center: Point, radius: f64) -> Self {
        Self::at_origin(
            Point::new(center.x + CENTER_CORRECTION, center.y + CENTER_CORRECTION),
            radius,
        )
    }

    /// Anchors around a center already expressed in pixel-index space.
    pub(crate) fn at_origin(origin: Point, radius: f64) -> Self {
        let (ccx, ccy) = (origin.x, origin.y);
        let ri = radius.floor();
        let f = radius - ri;
        Self {
            left: saturate_i32((ccx - f).ceil()),
            right: saturate_i32((ccx + f).floor()),
            top: saturate_i32((ccy - f).ceil()),
            bottom: saturate_i32((ccy + f).floor()),
            radius: saturate_i32(ri),
        }
    }

    /// Pixel bounds of the outline grown by `pad` on every side.
    pub(crate) fn bounds(&self, pad: i32) -> PixelRect {
        let r = self.radius.saturating_add(pad);
        PixelRect::new(
            self.left.min(self.right).saturating_sub(r),
            self.top.min(self.bottom).saturating_sub(r),
            self.left.max(self.right).saturating_add(r).saturating_add(1),
            self.top.max(self.bottom).saturating_add(r).saturating_add(1),
        )
    }

    /// One eighth of the circle, `x >= y`, from the rightmost point towards 45 degrees.
    fn octant(&self, mut step: impl FnMut(i32, i32)) {
        let mut x = self.radius;
        let mut y = 0;
        let mut err = 1 - x;
        while x >= y {
            step(x, y);
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Every outline pixel; the mirrored group is skipped on the 45 degree diagonal
    /// where it would repeat the same points.
    pub(crate) fn outline(&self, mut emit: impl FnMut(i32, i32)) {
        let Self {
            left: l,
            right: r,
            top: t,
            bottom: b,
            ..
        } = *self;
        self.octant(|x, y| {
            emit(r + x, b + y);
            emit(l - x, b + y);
            emit(r + x, t - y);
            emit(l - x, t - y);
            if x != y {
                emit(r + y, b + x);
                emit(l - y, b + x);
                emit(r + y, t - x);
                emit(l - y, t - x);
            }
        });
    }

    /// Widest outline extent of every row inside `limit`, as inclusive `(min_x, max_x)`.
    fn row_extents(&self, limit: PixelRect) -> Vec<Option<(i32, i32)>> {
        let mut table: Vec<Option<(i32, i32)>> = vec![None; limit.height().max(0) as usize];
        let Self {
            left: l,
            right: r,
            top: t,
            bottom: b,
            ..
        } = *self;
        let mut widen = |row: i32, a: i32, c: i32| {
            if row < limit.y0 || row >= limit.y1 {
                return;
            }
            let (lo, hi) = (a.min(c), a.max(c));
            let slot = &mut table[(row - limit.y0) as usize];
            *slot = Some(match *slot {
                Some((x0, x1)) => (x0.min(lo), x1.max(hi)),
                None => (lo, hi),
            });
        };
        self.octant(|x, y| {
            widen(b + y, l - x, r + x);
            widen(t - y, l - x, r + x);
            widen(b + x, l - y, r + y);
            widen(t - x, l - y, r + y);
        });
        table
    }

    /// Filled disk as one span per row.
    pub(crate) fn fill_into(&self, limit: PixelRect, sink: &mut impl SpanSink) {
        let area = self.bounds(0).intersect(limit);
        if area.is_empty() {
            return;
        }
        for (i, extent) in self.row_extents(area).into_iter().enumerate() {
            let Some((x0, x1)) = extent else {
                continue;
            };
            let (x0, x1) = (x0.max(area.x0), x1.min(area.x1 - 1));
            if x1 >= x0 {
                sink.span(x0, area.y0 + i as i32, (x1 - x0 + 1) as u32);
            }
        }
    }
}

pub(crate) fn draw(comp: &mut Compositor<'_>, circle: &CircleShape) {
    // Negative and NaN radii draw nothing.
    if circle.radius.is_nan() || circle.radius < 0.0 {
        return;
    }
    if circle.radius == 0.0 {
        draw_dot(comp, circle);
        return;
    }
    let anchors = Anchors::new(circle.center, circle.radius);
    let limit = comp.bounds();
    if circle.clipping_only {
        anchors.fill_into(limit, &mut comp.brush(Ink::Clip));
        return;
    }
    match (circle.fill_color, circle.stroke()) {
        (None, None) => {}
        (None, Some(color)) if circle.stroke_width <= 1.0 => hairline(comp, &anchors, color),
        (Some(fill), None) => {
            let mut runs: Vec<PixelRun> = Vec::new();
            anchors.fill_into(limit, &mut runs);
            comp.set_pixel_runs(&runs, fill);
        }
        (fill, stroke) => analytic(comp, circle, fill, stroke),
    }
}

/// Zero radius: exactly one pixel at the rounded center.
pub(crate) fn draw_dot(comp: &mut Compositor<'_>, circle: &CircleShape) {
    let (x, y) = (round_px(circle.center.x), round_px(circle.center.y));
    if circle.clipping_only {
        comp.clip_pixel(x, y);
        return;
    }
    if let Some(color) = circle.stroke().or(circle.fill_color) {
        comp.set_pixel(x, y, color);
    }
}

fn hairline(comp: &mut Compositor<'_>, anchors: &Anchors, color: Rgba8) {
    if comp.is_direct_write(color) {
        anchors.outline(|x, y| comp.set_pixel(x, y, color));
        return;
    }
    let mut set = PixelSet::new(anchors.bounds(0).intersect(comp.bounds()));
    anchors.outline(|x, y| {
        set.insert(x, y);
    });
    set.paint(comp, Ink::Paint(color));
}

/// Runs for the disk and the annulus of a circle, row by row.
#[derive(Debug, Default)]
pub(crate) struct AnnulusRuns {
    pub fill: Vec<PixelRun>,
    pub stroke: Vec<PixelRun>,
}

/// Analytic scan: fill within `radius`, stroke between `radius ∓ stroke_width / 2`.
pub(crate) fn annulus_runs(
    center: Point,
    radius: f64,
    stroke_width: f64,
    limit: PixelRect,
) -> AnnulusRuns {
    let ccx = center.x + CENTER_CORRECTION;
    let ccy = center.y + CENTER_CORRECTION;
    let half = stroke_width.max(0.0) * 0.5;
    let outer = radius + half;
    let inner = (radius - half).max(0.0);

    let mut out = AnnulusRuns::default();
    let y0 = saturate_i32((ccy - outer).floor()).max(limit.y0);
    let y1 = saturate_i32((ccy + outer).ceil()).min(limit.y1 - 1);
    for py in y0..=y1 {
        let dy = f64::from(py) - ccy;
        let dy2 = dy * dy;
        if let Some(xf) = half_chord(radius, dy2) {
            push_inclusive(&mut out.fill, limit, ccx - xf, ccx + xf, py);
        }
        if half <= 0.0 {
            continue;
        }
        let Some(xo) = half_chord(outer, dy2) else {
            continue;
        };
        let (o0, o1) = (saturate_i32((ccx - xo).ceil()), saturate_i32((ccx + xo).floor()));
        match half_chord(inner, dy2).filter(|&xi| xi > 0.0) {
            Some(xi) => {
                // Hole: pixels strictly inside the inner circle.
                let h0 = saturate_i32((ccx - xi).floor()) + 1;
                let h1 = saturate_i32((ccx + xi).ceil()) - 1;
                if h1 >= h0 {
                    push_span(&mut out.stroke, limit, o0, h0.min(o1 + 1), py);
                    push_span(&mut out.stroke, limit, (h1 + 1).max(o0), o1 + 1, py);
                } else {
                    push_span(&mut out.stroke, limit, o0, o1 + 1, py);
                }
            }
            None => push_span(&mut out.stroke, limit, o0, o1 + 1, py),
        }
    }
    out
}

fn half_chord(radius: f64, dy2: f64) -> Option<f64> {
    let r2 = radius * radius;
    (r2 >= dy2).then(|| (r2 - dy2).sqrt())
}

fn push_inclusive(runs: &mut Vec<PixelRun>, limit: PixelRect, lo: f64, hi: f64, y: i32) {
    let x0 = saturate_i32(lo.ceil());
    let x1 = saturate_i32(hi.floor());
    push_span(runs, limit, x0, x1.saturating_add(1), y);
}

/// Push `[x0, x1)` clamped to `limit`.
fn push_span(runs: &mut Vec<PixelRun>, limit: PixelRect, x0: i32, x1: i32, y: i32) {
    if let Some(run) = PixelRun::between(x0.max(limit.x0), x1.min(limit.x1), y) {
        runs.span(run.x, run.y, run.len);
    }
}

fn analytic(
    comp: &mut Compositor<'_>,
    circle: &CircleShape,
    fill: Option<Rgba8>,
    stroke: Option<Rgba8>,
) {
    let width = if stroke.is_some() {
        circle.stroke_width
    } else {
        0.0
    };
    let runs = annulus_runs(circle.center, circle.radius, width, comp.bounds());
    if let Some(color) = fill {
        comp.set_pixel_runs(&runs.fill, color);
    }
    if let Some(color) = stroke {
        comp.set_pixel_runs(&runs.stroke, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/circle.rs"]
mod tests;
