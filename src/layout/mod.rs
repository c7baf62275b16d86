//! Layout engine: rich-text document to wrapped, measured lines, and the
//! canvas geometry derived from them.
//!
//! This module handles:
//! - Splitting run text into whitespace / non-whitespace tokens
//! - Greedy word wrap that never breaks on whitespace
//! - Measuring the inked vertical extent of the laid-out text
//! - Deriving canvas size, text origin and border rectangle

mod geometry;
mod lines;
mod tokenizer;

pub use geometry::{
    baseline_y, calculate_canvas_dimensions, compute_geometry, line_start_x,
    measure_vertical_bounds, text_origin, underline_stroke_width, underline_y, CanvasDimensions,
    CanvasGeometry, VerticalBounds,
};
pub use lines::{layout_lines, line_height_for, LaidOutLine, Token, LINE_HEIGHT_FACTOR};
pub use tokenizer::tokenize;
