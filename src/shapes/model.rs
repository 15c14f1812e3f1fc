//! Resolved, device-space shape descriptors.
//!
//! The context builds one of these per draw call (current transform and styles already
//! applied) and hands it to a rasterizer; scenes can also be authored directly in this
//! form and dispatched through [`Shape`].

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Rgba8};

/// Straight segment with butt ends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub thickness: f64,
    pub color: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation_rad: f64,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_color: Option<Rgba8>,
    #[serde(default)]
    pub fill_color: Option<Rgba8>,
    /// Accumulate into the clip scratch mask instead of painting.
    #[serde(default)]
    pub clipping_only: bool,
}

impl RectShape {
    pub fn stroke(&self) -> Option<Rgba8> {
        self.stroke_color.filter(|_| self.stroke_width > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRectShape {
    #[serde(flatten)]
    pub rect: RectShape,
    pub corner_radius: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Point,
    pub radius: f64,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub stroke_color: Option<Rgba8>,
    #[serde(default)]
    pub fill_color: Option<Rgba8>,
    #[serde(default)]
    pub clipping_only: bool,
}

impl CircleShape {
    pub fn stroke(&self) -> Option<Rgba8> {
        self.stroke_color.filter(|_| self.stroke_width > 0.0)
    }
}

/// Circle restricted to the clockwise angular range `start..end` (degrees, y down).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    #[serde(flatten)]
    pub circle: CircleShape,
    pub start_angle_deg: f64,
    pub end_angle_deg: f64,
}

/// Closed set of drawable shapes; every rasterizer has exactly one arm.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Line(Line),
    Rect(RectShape),
    /// Reset the covered pixels to transparent black.
    ClearRect(RectShape),
    RoundRect(RoundRectShape),
    Circle(CircleShape),
    Arc(ArcShape),
}
