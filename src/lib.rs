//! textframe - rich text framed by decorative borders
//!
//! Lays out formatted text, sizes a canvas around it and paints it with a
//! border, in the browser via WebAssembly and Canvas 2D or headless:
//! - Greedy word wrap over styled runs (fonts, sizes, colors, highlights)
//! - Tight glyph bounds and canvas sizing with padding on every side
//! - Solid, concentric multi-color and image-tile borders
//! - PNG export
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { TextFrame } from 'textframe';
//! await init();
//! const frame = new TextFrame(canvas);
//! frame.register_image('vine', imageElement);
//! frame.render(quill.getContents(), settings);
//! const png = frame.export_png();
//! ```

pub mod config;
pub mod delta;
pub mod error;
pub mod measure;
pub mod style;
pub mod types;

// Layout and rendering
pub mod layout;
pub mod render;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::TextFrame;

pub use config::{build_render_config, RenderConfig, RenderSettings};
pub use delta::{document_from_json, document_from_ops, parse_delta, DeltaOp};
pub use error::{Result, TextframeError};
pub use measure::{ApproxMeasurer, TextMeasurer, TextMetrics};
pub use render::{Renderer, Surface};
pub use style::{FontRegistry, SizeRegistry, StyleResolver};
pub use types::*;

/// Lay out and paint a delta headlessly, returning the display list as JSON.
///
/// # Arguments
/// * `delta_json` - Editor contents, `{"ops": [...]}` or a bare op array
/// * `settings_json` - Render settings; `"{}"` for defaults
///
/// # Errors
/// Returns an error if either payload is not valid JSON.
#[wasm_bindgen]
pub fn render_display_list_json(
    delta_json: &str,
    settings_json: &str,
) -> std::result::Result<String, JsValue> {
    let settings =
        RenderSettings::from_json(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let images = std::collections::HashMap::new();
    let list = render::render_display_list(delta_json, &settings, &images)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&list)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
