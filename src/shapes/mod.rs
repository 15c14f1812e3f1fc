pub mod arc;
pub mod circle;
pub mod line;
pub mod model;
pub mod rect;
pub mod round_rect;

#[cfg(test)]
#[path = "../../tests/unit/shapes/support.rs"]
pub(crate) mod test_support;

use crate::foundation::error::CanvasResult;
use crate::raster::compositor::Compositor;
use model::Shape;

/// Collects non-fatal quality diagnostics raised while rasterizing.
#[derive(Clone, Debug, Default)]
pub struct QualityLog {
    enabled: bool,
    crispness_warnings: usize,
}

impl QualityLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            crispness_warnings: 0,
        }
    }

    pub fn crispness_warnings(&self) -> usize {
        self.crispness_warnings
    }

    /// Geometry that had to be snapped to the pixel grid, so its visible edge will not
    /// match an aliased browser canvas.
    pub(crate) fn misaligned(&mut self, shape: &'static str, x: f64, y: f64, w: f64, h: f64) {
        if !self.enabled {
            return;
        }
        self.crispness_warnings += 1;
        tracing::warn!(
            shape,
            x,
            y,
            w,
            h,
            "geometry is not grid-aligned; edges are snapped and may differ from an aliased browser canvas"
        );
    }
}

/// Rasterize one resolved shape.
pub fn rasterize(comp: &mut Compositor<'_>, shape: &Shape, log: &mut QualityLog) -> CanvasResult<()> {
    match shape {
        Shape::Line(l) => line::draw(comp, l),
        Shape::Rect(r) => rect::draw(comp, r, log),
        Shape::ClearRect(r) => rect::clear(comp, r),
        Shape::RoundRect(r) => round_rect::draw(comp, r, log)?,
        Shape::Circle(c) => circle::draw(comp, c),
        Shape::Arc(a) => arc::draw(comp, a),
    }
    Ok(())
}
