//! Canvas 2D backend.
//!
//! Paints through the HTML Canvas 2D API via web-sys and measures text with
//! the same context, so layout and painting agree on glyph metrics.

mod surface;

pub use surface::{CanvasSurface, CanvasTextMeasurer};
