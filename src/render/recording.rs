//! Headless surface that records a display list.
//!
//! Used natively (CLI, tests, benches) where no canvas exists. Every call is
//! captured as a [`DrawCommand`] in order, so callers can assert on exactly
//! what a render pass would have painted.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TextframeError};
use crate::types::ImageSource;

use super::backend::Surface;

/// Image stand-in for the recording surface: an id and its natural size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

impl ImageRef {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

impl ImageSource for ImageRef {
    fn natural_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64, color: String },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticCurveTo { cpx: f64, cpy: f64, x: f64, y: f64 },
    ClosePath,
    Clip,
    Save,
    Restore,
    Stroke { line_width: f64, color: String },
    Fill { color: String },
    DrawImage { id: String, x: f64, y: f64, w: f64, h: f64 },
    FillText { text: String, font: String, color: String, x: f64, y: f64 },
    Translate { x: f64, y: f64 },
    Rotate { radians: f64 },
    Scale { x: f64, y: f64 },
}

/// [`Surface`] that appends every call to a command list.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Forget recorded commands, keeping the size.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
        self.depth = 0;
        self.max_depth = 0;
    }

    /// Current save/restore nesting. Zero after a balanced pass.
    pub fn save_depth(&self) -> usize {
        self.depth
    }

    pub fn max_save_depth(&self) -> usize {
        self.max_depth
    }

    /// Recorded image draws as `(id, x, y, w, h)`.
    pub fn image_draws(&self) -> Vec<(&str, f64, f64, f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawImage { id, x, y, w, h } => Some((id.as_str(), *x, *y, *w, *h)),
                _ => None,
            })
            .collect()
    }

    /// Recorded strokes as `(line_width, color)`.
    pub fn strokes(&self) -> Vec<(f64, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Stroke { line_width, color } => Some((*line_width, color.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Recorded text draws.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    type Image = ImageRef;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.push(DrawCommand::Resize { width, height });
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo { x, y });
    }

    fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.push(DrawCommand::QuadraticCurveTo { cpx, cpy, x, y });
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn clip(&mut self) {
        self.push(DrawCommand::Clip);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.push(DrawCommand::Restore);
    }

    fn stroke(&mut self, line_width: f64, color: &str) {
        self.push(DrawCommand::Stroke {
            line_width,
            color: color.to_string(),
        });
    }

    fn fill(&mut self, color: &str) {
        self.push(DrawCommand::Fill {
            color: color.to_string(),
        });
    }

    fn draw_image(&mut self, image: &ImageRef, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawCommand::DrawImage {
            id: image.id.clone(),
            x,
            y,
            w,
            h,
        });
    }

    fn fill_text(&mut self, text: &str, font: &str, color: &str, x: f64, y: f64) {
        self.push(DrawCommand::FillText {
            text: text.to_string(),
            font: font.to_string(),
            color: color.to_string(),
            x,
            y,
        });
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, radians: f64) {
        self.push(DrawCommand::Rotate { radians });
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::Scale { x, y });
    }

    fn to_png_data_url(&self) -> Result<String> {
        Err(TextframeError::Export(
            "recording surface has no pixels to encode".to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_save_depth() {
        let mut s = RecordingSurface::new(10, 10);
        s.save();
        s.save();
        s.restore();
        assert_eq!(s.save_depth(), 1);
        s.restore();
        s.restore();
        assert_eq!(s.save_depth(), 0);
        assert_eq!(s.max_save_depth(), 2);
    }

    #[test]
    fn test_resize_updates_size_and_records() {
        let mut s = RecordingSurface::default();
        s.resize(40, 20);
        assert_eq!((s.width(), s.height()), (40, 20));
        assert_eq!(s.commands(), [DrawCommand::Resize { width: 40, height: 20 }]);
    }

    #[test]
    fn test_export_is_unsupported() {
        let s = RecordingSurface::new(1, 1);
        assert!(matches!(s.to_png_data_url(), Err(TextframeError::Export(_))));
    }

    #[test]
    fn test_commands_serialize_with_op_tag() {
        let json = serde_json::to_value(DrawCommand::Fill {
            color: "#FFFFFF".to_string(),
        })
        .unwrap();
        assert_eq!(json["op"], "fill");
        assert_eq!(json["color"], "#FFFFFF");
    }
}
