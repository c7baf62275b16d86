use serde::{Deserialize, Serialize};

/// Distances on each side of a box, in CSS pixels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Padding between the canvas edge and the border (or the text, when the
/// border is disabled). Independent of the border's own text padding.
pub type CanvasSizePadding = Padding;

/// Whether a background is painted or left transparent.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundMode {
    #[default]
    Solid,
    Transparent,
}

/// Canvas-wide fill painted before anything else.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanvasBackground {
    pub mode: BackgroundMode,
    pub color: String,
}

impl Default for CanvasBackground {
    fn default() -> Self {
        Self {
            mode: BackgroundMode::Solid,
            color: "#FFFFFF".to_string(),
        }
    }
}

/// Axis-aligned rectangle in CSS pixels.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Shrink (positive `d`) or grow (negative `d`) by `d` on every side.
    /// Width and height never go below zero.
    pub fn inset(self, d: f64) -> Self {
        Self {
            x: self.x + d,
            y: self.y + d,
            width: (self.width - 2.0 * d).max(0.0),
            height: (self.height - 2.0 * d).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
