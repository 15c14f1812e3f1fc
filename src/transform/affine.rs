//! Affine transform state for the drawing context.

use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::math::MIN_LINE_WIDTH;

/// Current transformation matrix.
///
/// Only affine maps are representable: the implicit last row is always `(0, 0, 1)`.
/// Composition right-multiplies, so `translate` then `rotate` rotates about the
/// translated origin, matching the browser API.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D(Affine);

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Self = Self(Affine::IDENTITY);

    pub fn from_affine(affine: Affine) -> Self {
        Self(affine)
    }

    pub fn affine(self) -> Affine {
        self.0
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.0 = self.0 * Affine::translate(Vec2::new(tx, ty));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.0 = self.0 * Affine::scale_non_uniform(sx, sy);
    }

    /// Rotate by `rad`, clockwise on a y-down surface.
    pub fn rotate(&mut self, rad: f64) {
        self.0 = self.0 * Affine::rotate(rad);
    }

    pub fn reset(&mut self) {
        self.0 = Affine::IDENTITY;
    }

    pub fn apply(self, p: Point) -> Point {
        self.0 * p
    }

    /// Rotation of the linear part, in radians.
    pub fn rotation(self) -> f64 {
        let [a, b, ..] = self.0.as_coeffs();
        b.atan2(a)
    }

    /// Length of the transformed x basis vector.
    pub fn scale_x(self) -> f64 {
        let [a, b, ..] = self.0.as_coeffs();
        a.hypot(b)
    }

    /// Length of the transformed y basis vector.
    pub fn scale_y(self) -> f64 {
        let [_, _, c, d, ..] = self.0.as_coeffs();
        c.hypot(d)
    }

    /// Geometric mean of the axis scales; how lengths such as radii scale.
    pub fn mean_scale(self) -> f64 {
        (self.scale_x() * self.scale_y()).sqrt()
    }

    /// Device-space width of a stroke of user-space `width`.
    pub fn scaled_line_width(self, width: f64) -> f64 {
        (width * self.mean_scale()).max(MIN_LINE_WIDTH)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
