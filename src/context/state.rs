use crate::foundation::core::Rgba8;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::raster::clip_mask::ClipMask;
use crate::transform::affine::Transform2D;

/// Drawing state captured by `save()` and brought back by `restore()`.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextState {
    pub transform: Transform2D,
    pub fill_color: Rgba8,
    pub stroke_color: Rgba8,
    pub line_width: f64,
    pub global_alpha: f64,
    pub clip: ClipMask,
}

impl ContextState {
    /// Browser defaults: black paints, 1px lines, opaque, nothing clipped.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            transform: Transform2D::IDENTITY,
            fill_color: Rgba8::BLACK,
            stroke_color: Rgba8::BLACK,
            line_width: 1.0,
            global_alpha: 1.0,
            clip: ClipMask::new(width, height),
        }
    }
}

/// Non-empty stack of states; the bottom one lives as long as the context.
#[derive(Clone, Debug)]
pub struct StateStack {
    states: Vec<ContextState>,
}

impl StateStack {
    pub fn new(initial: ContextState) -> Self {
        Self {
            states: vec![initial],
        }
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    pub fn top(&self) -> &ContextState {
        // The bottom state is never popped.
        &self.states[self.states.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut ContextState {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    /// Push a deep copy of the current state, clip mask included.
    pub fn save(&mut self) {
        let copy = self.top().clone();
        self.states.push(copy);
    }

    pub fn restore(&mut self) -> CanvasResult<()> {
        if self.states.len() <= 1 {
            return Err(CanvasError::state(
                "restore() without a matching save(): the base state cannot be popped",
            ));
        }
        self.states.pop();
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/state.rs"]
mod tests;
