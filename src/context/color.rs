//! CSS color strings accepted by `fillStyle` / `strokeStyle`.

use std::collections::HashMap;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CanvasError, CanvasResult};

/// Turns a style string into a color. Owned by the context so callers can swap in
/// their own grammar.
pub trait ColorParser {
    fn parse(&mut self, input: &str) -> CanvasResult<Rgba8>;
}

/// `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
///
/// Channels are clamped to `0..=255` and alpha to `[0, 1]`; anything else is a
/// [`CanvasError::Color`]. Parsed strings are memoized.
#[derive(Clone, Debug, Default)]
pub struct CssColorParser {
    cache: HashMap<String, Rgba8>,
}

impl CssColorParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl ColorParser for CssColorParser {
    fn parse(&mut self, input: &str) -> CanvasResult<Rgba8> {
        if let Some(&c) = self.cache.get(input) {
            return Ok(c);
        }
        let color = parse_css_color(input)?;
        self.cache.insert(input.to_owned(), color);
        Ok(color)
    }
}

pub fn parse_css_color(input: &str) -> CanvasResult<Rgba8> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| malformed(input));
    }
    let lower = s.to_ascii_lowercase();
    let (args, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba") {
        (rest, true)
    } else if let Some(rest) = lower.strip_prefix("rgb") {
        (rest, false)
    } else {
        return Err(malformed(input));
    };
    let inner = args
        .trim_start()
        .strip_prefix('(')
        .and_then(|r| r.trim_end().strip_suffix(')'))
        .ok_or_else(|| malformed(input))?;

    let parts = inner
        .split(',')
        .map(|p| p.trim().parse::<f64>().ok().filter(|v| !v.is_nan()))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| malformed(input))?;

    match (has_alpha, parts.as_slice()) {
        (false, &[r, g, b]) => Ok(Rgba8::from_clamped(r, g, b, 1.0)),
        (true, &[r, g, b, a]) => Ok(Rgba8::from_clamped(r, g, b, a.clamp(0.0, 1.0))),
        _ => Err(malformed(input)),
    }
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
    match hex.len() {
        3 => {
            let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
            Some(Rgba8::opaque(r * 17, g * 17, b * 17))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgba8::opaque(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn malformed(input: &str) -> CanvasError {
    CanvasError::color(format!(
        "unsupported color `{input}` (expected #rgb, #rrggbb, rgb(r,g,b) or rgba(r,g,b,a))"
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/context/color.rs"]
mod tests;
