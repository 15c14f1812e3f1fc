use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

/// Construction options for [`Context2d`](crate::Context2d).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextOpts {
    pub width: u32,
    pub height: u32,
    /// Initial fill of the framebuffer; transparent black when absent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Count and log misaligned rect / rounded-rect geometry.
    pub crispness_warnings: bool,
}

impl Default for ContextOpts {
    fn default() -> Self {
        Self {
            width: 300,
            height: 150,
            clear_rgba: None,
            crispness_warnings: true,
        }
    }
}

impl ContextOpts {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// [`ContextOpts::new`] with overrides from the environment:
    /// `CRISP_CANVAS_CRISPNESS_WARNINGS=0|false|off` turns the warnings off.
    pub fn from_env(width: u32, height: u32) -> Self {
        let mut opts = Self::new(width, height);
        if let Some(enabled) = std::env::var("CRISP_CANVAS_CRISPNESS_WARNINGS")
            .ok()
            .and_then(|v| parse_flag(&v))
        {
            opts.crispness_warnings = enabled;
        }
        opts
    }

    pub fn clear_color(&self) -> Rgba8 {
        self.clear_rgba.map(Rgba8::from).unwrap_or(Rgba8::TRANSPARENT)
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/opts.rs"]
mod tests;
