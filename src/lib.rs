//! Crisp software 2D rasterizer with a Canvas-2D-like API.
//!
//! Shapes (lines, rects, rounded rects, circles, arcs) are scan-converted straight into an
//! RGBA8 framebuffer without anti-aliasing, so axis-aligned edges land on exact pixel
//! boundaries. Drawing goes through [`Context2d`]; already resolved device-space shapes
//! can also be fed through [`Context2d::draw_shape`] or a JSON [`Scene`].
#![forbid(unsafe_code)]

pub mod context;
pub mod foundation;
pub mod raster;
pub mod render;
pub mod shapes;
pub mod transform;

pub use context::color::{ColorParser, CssColorParser, parse_css_color};
pub use context::context2d::Context2d;
pub use context::opts::ContextOpts;
pub use context::state::{ContextState, StateStack};
pub use foundation::core::{Affine, PixelRect, Point, Rgba8, Vec2};
pub use foundation::error::{CanvasError, CanvasResult};
pub use raster::clip_mask::ClipMask;
pub use raster::compositor::{Compositor, Ink, PixelRun, SpanSink};
pub use raster::framebuffer::Framebuffer;
pub use render::scene::{Scene, render_scene, render_scene_image};
pub use render::snapshot::{ImageData, ImageFingerprint};
pub use shapes::model::{ArcShape, CircleShape, Line, RectShape, RoundRectShape, Shape};
pub use transform::affine::Transform2D;
