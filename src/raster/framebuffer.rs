use crate::foundation::core::Rgba8;
use crate::foundation::error::{CanvasError, CanvasResult};

/// Fixed-size RGBA8 pixel store, row-major and top-down.
///
/// Pixels are kept as packed little-endian words so opaque writes are a single store;
/// [`Framebuffer::as_bytes`] exposes the same memory as `R, G, B, A` bytes.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    words: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::validation(
                "framebuffer width and height must be > 0",
            ));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| i32::try_from(n).is_ok())
            .ok_or_else(|| CanvasError::validation("framebuffer size overflow"))?;
        Ok(Self {
            width,
            height,
            words: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub(crate) fn index(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        self.contains(x, y)
            .then(|| Rgba8::from_packed(self.words[self.index(x, y)]))
    }

    pub fn fill(&mut self, color: Rgba8) {
        self.words.fill(color.to_packed());
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.words)
    }

    pub(crate) fn words_mut(&mut self) -> &mut [u32] {
        &mut self.words
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/framebuffer.rs"]
mod tests;
