/// One bit per pixel: 1 = visible, 0 = clipped out.
///
/// Bit index for `(x, y)` is `y * width + x`, addressed MSB-first within its byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipMask {
    width: u32,
    height: u32,
    bits: Vec<u8>,
    all_visible: bool,
}

impl ClipMask {
    /// A fully visible mask.
    pub fn new(width: u32, height: u32) -> Self {
        let len = ((width as usize) * (height as usize)).div_ceil(8);
        Self {
            width,
            height,
            bits: vec![0xFF; len],
            all_visible: true,
        }
    }

    /// A mask with nothing visible, ready to accumulate a clip region.
    pub fn new_clipped(width: u32, height: u32) -> Self {
        let mut mask = Self::new(width, height);
        mask.clip_all();
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clip_all(&mut self) {
        self.bits.fill(0);
        self.all_visible = false;
    }

    pub fn set_all_visible(&mut self) {
        self.bits.fill(0xFF);
        self.all_visible = true;
    }

    pub fn is_all_visible(&self) -> bool {
        self.all_visible
    }

    /// Both masks must share dimensions; a context only ever builds them from its own
    /// framebuffer size.
    pub fn intersect_with(&mut self, other: &ClipMask) {
        debug_assert_eq!(self.bits.len(), other.bits.len());
        for (a, b) in self.bits.iter_mut().zip(&other.bits) {
            *a &= *b;
        }
        self.all_visible = self.compute_all_visible();
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        self.bit(self.bit_index(x, y))
    }

    pub(crate) fn bit_index(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub(crate) fn byte(&self, bit_index: usize) -> u8 {
        self.bits[bit_index >> 3]
    }

    pub(crate) fn bit(&self, bit_index: usize) -> bool {
        self.bits[bit_index >> 3] & (0x80 >> (bit_index & 7)) != 0
    }

    pub(crate) fn set_bit(&mut self, bit_index: usize) {
        self.bits[bit_index >> 3] |= 0x80 >> (bit_index & 7);
    }

    /// Set `len` consecutive bits starting at `bit_index`, whole bytes at a time where
    /// possible.
    pub(crate) fn set_bit_range(&mut self, bit_index: usize, len: usize) {
        let end = bit_index + len;
        let mut i = bit_index;
        while i < end {
            if i & 7 == 0 && i + 8 <= end {
                self.bits[i >> 3] = 0xFF;
                i += 8;
            } else {
                self.set_bit(i);
                i += 1;
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    fn compute_all_visible(&self) -> bool {
        let total = (self.width as usize) * (self.height as usize);
        let full = total / 8;
        if self.bits[..full].iter().any(|&b| b != 0xFF) {
            return false;
        }
        let rem = total % 8;
        if rem == 0 {
            return true;
        }
        let tail_mask = !(0xFFu8 >> rem);
        self.bits[full] & tail_mask == tail_mask
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/clip_mask.rs"]
mod tests;
