//! JSON scene documents: a canvas size, an optional background and a list of resolved
//! device-space shapes.

use serde::{Deserialize, Serialize};

use crate::context::context2d::Context2d;
use crate::context::opts::ContextOpts;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::snapshot::ImageData;
use crate::shapes::model::Shape;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub background: Option<Rgba8>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let scene: Self =
            serde_json::from_str(json).map_err(|e| CanvasError::serde(e.to_string()))?;
        if scene.width == 0 || scene.height == 0 {
            return Err(CanvasError::validation(format!(
                "scene size must be non-zero, got {}x{}",
                scene.width, scene.height
            )));
        }
        Ok(scene)
    }

    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CanvasError::serde(e.to_string()))
    }
}

/// Draw every shape of `scene` in order onto a fresh context.
#[tracing::instrument(skip(scene), fields(width = scene.width, height = scene.height, shapes = scene.shapes.len()))]
pub fn render_scene(scene: &Scene) -> CanvasResult<Context2d> {
    let mut opts = ContextOpts::from_env(scene.width, scene.height);
    opts.clear_rgba = scene.background.map(Rgba8::to_array);
    let mut ctx = Context2d::with_opts(opts)?;
    for (i, shape) in scene.shapes.iter().enumerate() {
        ctx.draw_shape(shape)
            .map_err(|e| CanvasError::Other(anyhow::anyhow!("scene shape #{i}: {e}")))?;
    }
    tracing::debug!(
        crispness_warnings = ctx.crispness_warnings(),
        "scene rendered"
    );
    Ok(ctx)
}

/// [`render_scene`] followed by a full-canvas snapshot.
pub fn render_scene_image(scene: &Scene) -> CanvasResult<ImageData> {
    let ctx = render_scene(scene)?;
    ctx.get_image_data(0, 0, scene.width, scene.height)
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
