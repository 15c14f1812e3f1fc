pub use kurbo::{Affine, Point, Vec2};

/// Straight (non-premultiplied) RGBA8 color.
///
/// Alpha lives in 0..=255 like the other channels; the context-level global alpha is a
/// separate `f64` multiplier applied at composite time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Build a color from unbounded channel values, clamping each into `0..=255`.
    ///
    /// `alpha` is a unit value in `[0, 1]` (CSS convention); NaN maps to 0.
    pub fn from_clamped(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_channel(alpha * 255.0),
        }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Pack into the framebuffer word layout `(A<<24)|(B<<16)|(G<<8)|R`.
    pub fn to_packed(self) -> u32 {
        u32::from_le_bytes([self.r, self.g, self.b, self.a])
    }

    pub fn from_packed(word: u32) -> Self {
        let [r, g, b, a] = word.to_le_bytes();
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Integer pixel rectangle, half-open on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest pixel rect containing every pixel whose center may fall in the given
    /// continuous bounds.
    pub fn covering(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            x0: saturate_i32(min_x.floor()),
            y0: saturate_i32(min_y.floor()),
            x1: saturate_i32(max_x.ceil()).saturating_add(1),
            y1: saturate_i32(max_y.ceil()).saturating_add(1),
        }
    }

    pub fn width(self) -> i32 {
        (self.x1 - self.x0).max(0)
    }

    pub fn height(self) -> i32 {
        (self.y1 - self.y0).max(0)
    }

    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn intersect(self, other: Self) -> Self {
        Self {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    /// Grown by `pad` on every side, saturating at the `i32` range.
    pub fn grow(self, pad: i32) -> Self {
        Self {
            x0: self.x0.saturating_sub(pad),
            y0: self.y0.saturating_sub(pad),
            x1: self.x1.saturating_add(pad),
            y1: self.y1.saturating_add(pad),
        }
    }

    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// `(x, y, len)` for every row; nothing when empty.
    pub fn rows(self) -> impl Iterator<Item = (i32, i32, u32)> {
        let len = self.width() as u32;
        let ys = if self.is_empty() { 0..0 } else { self.y0..self.y1 };
        ys.map(move |y| (self.x0, y, len))
    }
}

/// Float-to-pixel conversion that saturates instead of wrapping for huge or NaN inputs.
pub fn saturate_i32(v: f64) -> i32 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(f64::from(i32::MIN / 2), f64::from(i32::MAX / 2)) as i32
}
