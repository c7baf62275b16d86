//! Rendering engine with pluggable surfaces.
//!
//! This module provides:
//! - The `Surface` drawing trait and a recording implementation
//! - The border compositor and the text painter
//! - The render orchestrator and PNG export
//! - Canvas 2D backend (wasm32 only)
//! - Color parsing utilities

pub mod backend;
pub mod border;
pub mod cache;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
pub mod export;
pub mod painter;
pub mod recording;
pub mod renderer;

// Re-export commonly used types
pub use backend::Surface;
pub use border::{
    corner_size, draw_border, draw_image_border, draw_inside_out, draw_side_image,
    draw_slot_image, rounded_rect_path, SideAxis, MIN_TILE_LENGTH,
};
pub use cache::{FontMetrics, FontMetricsCache};
#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasSurface, CanvasTextMeasurer};
pub use colors::{color_or, palette, parse_color, CssColor};
pub use export::png_bytes_from_data_url;
pub use painter::paint;
pub use recording::{DrawCommand, ImageRef, RecordingSurface};
pub use renderer::{export_png, render_display_list, DisplayList, RenderReport, Renderer};
