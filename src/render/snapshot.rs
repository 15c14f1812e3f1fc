use crate::foundation::core::Rgba8;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::raster::framebuffer::Framebuffer;

/// Row-major RGBA8 copy of a framebuffer region: straight alpha, top-down,
/// stride `width * 4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl ImageData {
    /// Copy `[x, x + width) × [y, y + height)`; pixels outside the buffer read as
    /// transparent black.
    pub fn capture(fb: &Framebuffer, x: i32, y: i32, width: u32, height: u32) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::validation(format!(
                "image data size must be non-zero, got {width}x{height}"
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| CanvasError::validation("image data size overflows"))?;
        let mut data = vec![0u8; len];
        let stride = width as usize * 4;

        // Overlap with the framebuffer, in source coordinates.
        let sx0 = i64::from(x).max(0);
        let sy0 = i64::from(y).max(0);
        let sx1 = (i64::from(x) + i64::from(width)).min(i64::from(fb.width()));
        let sy1 = (i64::from(y) + i64::from(height)).min(i64::from(fb.height()));
        if sx1 > sx0 && sy1 > sy0 {
            let src = fb.as_bytes();
            let src_stride = fb.width() as usize * 4;
            let run = (sx1 - sx0) as usize * 4;
            for sy in sy0..sy1 {
                let s = sy as usize * src_stride + sx0 as usize * 4;
                let d = (sy - i64::from(y)) as usize * stride + (sx0 - i64::from(x)) as usize * 4;
                data[d..d + run].copy_from_slice(&src[s..s + run]);
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.stride() + x as usize * 4;
        let px: [u8; 4] = self.data[i..i + 4].try_into().ok()?;
        Some(Rgba8::from(px))
    }

    /// Hand the pixels to `image` for export or diffing.
    pub fn to_rgba_image(&self) -> CanvasResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            CanvasError::validation(format!(
                "image data length {} does not match {}x{}",
                self.data.len(),
                self.width,
                self.height
            ))
        })
    }

    /// Stable 128-bit digest of size and pixels, for determinism checks.
    pub fn fingerprint(&self) -> ImageFingerprint {
        let mut a = Fnv1a64::new(0xcbf29ce484222325);
        let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);
        for h in [&mut a, &mut b] {
            h.write_u64(u64::from(self.width));
            h.write_u64(u64::from(self.height));
            h.write_bytes(&self.data);
        }
        ImageFingerprint {
            hi: a.finish(),
            lo: b.finish(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageFingerprint {
    pub hi: u64,
    pub lo: u64,
}

struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/snapshot.rs"]
mod tests;
