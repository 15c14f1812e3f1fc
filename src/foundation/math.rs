use std::f64::consts::{PI, TAU};

/// Shift applied to shape centers before scan conversion: inputs treat `x.5` as a pixel
/// center, outputs index pixels by their top-left corner.
pub const CENTER_CORRECTION: f64 = -0.5;

/// Arcs sit half a pixel further up and left than circles with the same center.
pub const ARC_CENTER_CORRECTION: f64 = -1.0;

/// Arc fills test against a radius shrunk by this much.
pub const ARC_RADIUS_INSET: f64 = 0.5;

/// Rotations closer than this to a multiple of 90 degrees take the axis-aligned path.
pub const AXIS_ALIGN_TOLERANCE_RAD: f64 = 0.001;

/// Opaque rounded-rect strokes narrower than this are painted without deduplication.
pub const THIN_STROKE_MAX_WIDTH: f64 = 5.0;

/// Floor for transformed line widths.
pub const MIN_LINE_WIDTH: f64 = 1e-3;

/// Tolerance used when deciding whether a coordinate already sits on the pixel grid.
pub const GRID_EPSILON: f64 = 1e-6;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Map any angle into `[0, 2π)`.
pub fn normalize_angle(rad: f64) -> f64 {
    let a = rad.rem_euclid(TAU);
    // rem_euclid can return TAU itself for tiny negative inputs.
    if a >= TAU { 0.0 } else { a }
}

/// Angular range test on normalized angles; `end < start` wraps through zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRange {
    start: f64,
    end: f64,
    full: bool,
}

impl AngleRange {
    pub fn from_degrees(start_deg: f64, end_deg: f64) -> Self {
        let full = (end_deg - start_deg).abs() >= 360.0;
        let start = normalize_angle(deg_to_rad(start_deg));
        let mut end = normalize_angle(deg_to_rad(end_deg));
        if end < start {
            end += TAU;
        }
        Self { start, end, full }
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Whether the direction `(dx, dy)` (y down) falls inside the range.
    pub fn contains_vector(&self, dx: f64, dy: f64) -> bool {
        self.contains(dy.atan2(dx))
    }

    pub fn contains(&self, rad: f64) -> bool {
        if self.full {
            return true;
        }
        let a = normalize_angle(rad);
        (a >= self.start && a <= self.end) || (a + TAU >= self.start && a + TAU <= self.end)
    }
}

/// Whether `v` is within [`GRID_EPSILON`] of an integer.
pub fn is_integral(v: f64) -> bool {
    (v - v.round()).abs() <= GRID_EPSILON
}

/// Nearest pixel boundary, ties rounding up so both edges of a band round the same way
/// regardless of sign.
pub fn round_px(v: f64) -> i32 {
    crate::foundation::core::saturate_i32((v + 0.5).floor())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
