//! Canvas-2D-like facade.
//!
//! Every drawing call resolves the current state (transform, styles, line width) into a
//! device-space [`Shape`] and hands it to [`shapes::rasterize`] through a compositor bound
//! to the current clip and global alpha.

use crate::context::color::{ColorParser, CssColorParser};
use crate::context::opts::ContextOpts;
use crate::context::state::{ContextState, StateStack};
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::rad_to_deg;
use crate::raster::clip_mask::ClipMask;
use crate::raster::compositor::Compositor;
use crate::raster::framebuffer::Framebuffer;
use crate::render::snapshot::ImageData;
use crate::shapes::{
    self, QualityLog,
    model::{ArcShape, CircleShape, Line, RectShape, RoundRectShape, Shape},
};
use crate::transform::affine::Transform2D;

/// Which paints a drawing call applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Paint {
    Fill,
    Stroke,
    FillAndStroke,
    Clip,
}

/// Software drawing context over a fixed-size RGBA8 framebuffer.
pub struct Context2d {
    fb: Framebuffer,
    stack: StateStack,
    /// Clip accumulator filled by `rect`/`circle`/`round_rect` between `begin_path`
    /// and `clip`.
    scratch: ClipMask,
    colors: Box<dyn ColorParser>,
    quality: QualityLog,
}

impl std::fmt::Debug for Context2d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context2d")
            .field("fb", &self.fb)
            .field("stack", &self.stack)
            .field("scratch", &self.scratch)
            .field("quality", &self.quality)
            .finish_non_exhaustive()
    }
}

impl Context2d {
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        Self::with_opts(ContextOpts::new(width, height))
    }

    pub fn with_opts(opts: ContextOpts) -> CanvasResult<Self> {
        let mut fb = Framebuffer::new(opts.width, opts.height)?;
        let clear = opts.clear_color();
        if clear != Rgba8::TRANSPARENT {
            fb.fill(clear);
        }
        Ok(Self {
            fb,
            stack: StateStack::new(ContextState::new(opts.width, opts.height)),
            scratch: ClipMask::new_clipped(opts.width, opts.height),
            colors: Box::new(CssColorParser::new()),
            quality: QualityLog::new(opts.crispness_warnings),
        })
    }

    /// Replace the style-string parser.
    pub fn with_color_parser(mut self, parser: Box<dyn ColorParser>) -> Self {
        self.colors = parser;
        self
    }

    pub fn width(&self) -> u32 {
        self.fb.width()
    }

    pub fn height(&self) -> u32 {
        self.fb.height()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }

    pub fn state(&self) -> &ContextState {
        self.stack.top()
    }

    /// Misaligned-geometry warnings raised so far.
    pub fn crispness_warnings(&self) -> usize {
        self.quality.crispness_warnings()
    }

    // ----- state -----

    pub fn save(&mut self) {
        self.stack.save();
    }

    pub fn restore(&mut self) -> CanvasResult<()> {
        self.stack.restore()
    }

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.stack.top_mut().transform.translate(tx, ty);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.stack.top_mut().transform.scale(sx, sy);
    }

    pub fn rotate(&mut self, rad: f64) {
        self.stack.top_mut().transform.rotate(rad);
    }

    pub fn reset_transform(&mut self) {
        self.stack.top_mut().transform.reset();
    }

    pub fn transform(&self) -> Transform2D {
        self.state().transform
    }

    pub fn set_fill_style(&mut self, style: &str) -> CanvasResult<()> {
        let color = self.colors.parse(style)?;
        self.stack.top_mut().fill_color = color;
        Ok(())
    }

    pub fn set_stroke_style(&mut self, style: &str) -> CanvasResult<()> {
        let color = self.colors.parse(style)?;
        self.stack.top_mut().stroke_color = color;
        Ok(())
    }

    pub fn set_fill_color(&mut self, color: Rgba8) {
        self.stack.top_mut().fill_color = color;
    }

    pub fn set_stroke_color(&mut self, color: Rgba8) {
        self.stack.top_mut().stroke_color = color;
    }

    pub fn fill_color(&self) -> Rgba8 {
        self.state().fill_color
    }

    pub fn stroke_color(&self) -> Rgba8 {
        self.state().stroke_color
    }

    /// Non-positive and non-finite widths are ignored, like the browser setter.
    pub fn set_line_width(&mut self, width: f64) {
        if !width.is_finite() || width <= 0.0 {
            tracing::debug!(width, "ignoring invalid line width");
            return;
        }
        self.stack.top_mut().line_width = width;
    }

    pub fn line_width(&self) -> f64 {
        self.state().line_width
    }

    /// Clamped into `[0, 1]`; NaN is ignored.
    pub fn set_global_alpha(&mut self, alpha: f64) {
        if alpha.is_nan() {
            tracing::debug!("ignoring NaN global alpha");
            return;
        }
        self.stack.top_mut().global_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn global_alpha(&self) -> f64 {
        self.state().global_alpha
    }

    // ----- rectangles -----

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> CanvasResult<()> {
        let rect = self.resolve_rect(x, y, w, h, Paint::Fill);
        self.draw_shape(&Shape::Rect(rect))
    }

    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> CanvasResult<()> {
        let rect = self.resolve_rect(x, y, w, h, Paint::Stroke);
        self.draw_shape(&Shape::Rect(rect))
    }

    pub fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> CanvasResult<()> {
        let rect = self.resolve_rect(x, y, w, h, Paint::Fill);
        self.draw_shape(&Shape::ClearRect(rect))
    }

    pub fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> CanvasResult<()> {
        let state = self.state();
        let t = state.transform;
        let line = Line {
            start: t.apply(Point::new(x0, y0)),
            end: t.apply(Point::new(x1, y1)),
            thickness: t.scaled_line_width(state.line_width),
            color: state.stroke_color,
        };
        self.draw_shape(&Shape::Line(line))
    }

    // ----- circles and arcs -----

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) -> CanvasResult<()> {
        let circle = self.resolve_circle(cx, cy, radius, Paint::Fill);
        self.draw_shape(&Shape::Circle(circle))
    }

    pub fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64) -> CanvasResult<()> {
        let circle = self.resolve_circle(cx, cy, radius, Paint::Stroke);
        self.draw_shape(&Shape::Circle(circle))
    }

    pub fn fill_and_stroke_circle(&mut self, cx: f64, cy: f64, radius: f64) -> CanvasResult<()> {
        let circle = self.resolve_circle(cx, cy, radius, Paint::FillAndStroke);
        self.draw_shape(&Shape::Circle(circle))
    }

    /// Angles in radians, clockwise on screen; `end < start` wraps through zero.
    pub fn fill_arc(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64) -> CanvasResult<()> {
        let arc = self.resolve_arc(cx, cy, r, start, end, Paint::Fill);
        self.draw_shape(&Shape::Arc(arc))
    }

    pub fn stroke_arc(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64) -> CanvasResult<()> {
        let arc = self.resolve_arc(cx, cy, r, start, end, Paint::Stroke);
        self.draw_shape(&Shape::Arc(arc))
    }

    pub fn fill_and_stroke_arc(
        &mut self,
        cx: f64,
        cy: f64,
        r: f64,
        start: f64,
        end: f64,
    ) -> CanvasResult<()> {
        let arc = self.resolve_arc(cx, cy, r, start, end, Paint::FillAndStroke);
        self.draw_shape(&Shape::Arc(arc))
    }

    // ----- rounded rectangles -----

    /// Fails when the transformed size is not a whole number of pixels on the
    /// axis-aligned path.
    pub fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, r: f64) -> CanvasResult<()> {
        let shape = self.resolve_round_rect(x, y, w, h, r, Paint::Fill);
        self.draw_shape(&Shape::RoundRect(shape))
    }

    pub fn stroke_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, r: f64) -> CanvasResult<()> {
        let shape = self.resolve_round_rect(x, y, w, h, r, Paint::Stroke);
        self.draw_shape(&Shape::RoundRect(shape))
    }

    // ----- clipping -----

    /// Start a new clip region; nothing accumulated so far carries over.
    pub fn begin_path(&mut self) {
        self.scratch.clip_all();
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> CanvasResult<()> {
        let rect = self.resolve_rect(x, y, w, h, Paint::Clip);
        self.draw_shape(&Shape::Rect(rect))
    }

    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64) -> CanvasResult<()> {
        let circle = self.resolve_circle(cx, cy, radius, Paint::Clip);
        self.draw_shape(&Shape::Circle(circle))
    }

    pub fn round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, r: f64) -> CanvasResult<()> {
        let shape = self.resolve_round_rect(x, y, w, h, r, Paint::Clip);
        self.draw_shape(&Shape::RoundRect(shape))
    }

    /// Narrow the current clip to the region accumulated since `begin_path`.
    pub fn clip(&mut self) {
        self.stack.top_mut().clip.intersect_with(&self.scratch);
    }

    /// Path filling is not implemented; use the shape-specific methods.
    pub fn fill(&mut self) -> CanvasResult<()> {
        Err(CanvasError::unsupported(
            "fill() on a path is not supported; use fill_rect, fill_circle, fill_round_rect or fill_arc",
        ))
    }

    /// Path stroking is not implemented; use the shape-specific methods.
    pub fn stroke(&mut self) -> CanvasResult<()> {
        Err(CanvasError::unsupported(
            "stroke() on a path is not supported; use stroke_rect, stroke_line, stroke_circle, stroke_round_rect or stroke_arc",
        ))
    }

    // ----- dispatch and output -----

    /// Rasterize an already resolved, device-space shape under the current clip and
    /// global alpha.
    pub fn draw_shape(&mut self, shape: &Shape) -> CanvasResult<()> {
        let top = self.stack.top();
        let mut comp = Compositor::new(&mut self.fb, &top.clip, &mut self.scratch, top.global_alpha);
        shapes::rasterize(&mut comp, shape, &mut self.quality)
    }

    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> CanvasResult<ImageData> {
        ImageData::capture(&self.fb, x, y, width, height)
    }

    // ----- resolution -----

    fn colors_for(&self, paint: Paint) -> (Option<Rgba8>, Option<Rgba8>, f64) {
        let s = self.state();
        let width = s.transform.scaled_line_width(s.line_width);
        match paint {
            Paint::Fill => (Some(s.fill_color), None, 0.0),
            Paint::Stroke => (None, Some(s.stroke_color), width),
            Paint::FillAndStroke => (Some(s.fill_color), Some(s.stroke_color), width),
            Paint::Clip => (None, None, 0.0),
        }
    }

    fn resolve_rect(&self, x: f64, y: f64, w: f64, h: f64, paint: Paint) -> RectShape {
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        let t = self.state().transform;
        let (fill_color, stroke_color, stroke_width) = self.colors_for(paint);
        RectShape {
            center: t.apply(Point::new(x + w * 0.5, y + h * 0.5)),
            width: w * t.scale_x(),
            height: h * t.scale_y(),
            rotation_rad: t.rotation(),
            stroke_width,
            stroke_color,
            fill_color,
            clipping_only: paint == Paint::Clip,
        }
    }

    fn resolve_round_rect(
        &self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        r: f64,
        paint: Paint,
    ) -> RoundRectShape {
        RoundRectShape {
            rect: self.resolve_rect(x, y, w, h, paint),
            corner_radius: r * self.state().transform.mean_scale(),
        }
    }

    fn resolve_circle(&self, cx: f64, cy: f64, radius: f64, paint: Paint) -> CircleShape {
        let t = self.state().transform;
        let (fill_color, stroke_color, stroke_width) = self.colors_for(paint);
        CircleShape {
            center: t.apply(Point::new(cx, cy)),
            radius: radius * t.mean_scale(),
            stroke_width,
            stroke_color,
            fill_color,
            clipping_only: paint == Paint::Clip,
        }
    }

    fn resolve_arc(&self, cx: f64, cy: f64, r: f64, start: f64, end: f64, paint: Paint) -> ArcShape {
        let rotation = rad_to_deg(self.state().transform.rotation());
        ArcShape {
            circle: self.resolve_circle(cx, cy, r, paint),
            start_angle_deg: rad_to_deg(start) + rotation,
            end_angle_deg: rad_to_deg(end) + rotation,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/context2d.rs"]
mod tests;
