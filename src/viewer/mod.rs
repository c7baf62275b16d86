//! Main TextFrame struct - the WASM entry point for Canvas 2D rendering.
//!
//! This module provides the `TextFrame` struct that handles:
//! - Owning the canvas surface and its text measurer
//! - Holding decoded border images by id
//! - Turning editor deltas and UI settings into painted frames
//! - PNG export

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use crate::config::{build_render_config, RenderSettings};
use crate::delta::{document_from_ops, DeltaOp, DeltaPayload};
use crate::render::{CanvasSurface, CanvasTextMeasurer, Renderer, Surface};
use crate::style::StyleResolver;

#[derive(serde::Serialize)]
struct RenderSummary {
    width: u32,
    height: u32,
    lines: usize,
}

/// Renders rich text with a border onto a canvas.
#[wasm_bindgen]
pub struct TextFrame {
    surface: CanvasSurface,
    measurer: CanvasTextMeasurer,
    renderer: Renderer,
    images: HashMap<String, HtmlImageElement>,
}

#[wasm_bindgen]
impl TextFrame {
    /// Create a frame that paints into `canvas`.
    ///
    /// # Errors
    /// Returns an error if the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<TextFrame, JsValue> {
        console_error_panic_hook::set_once();

        let surface = CanvasSurface::new(canvas)?;
        let measurer = surface.measurer();
        Ok(Self {
            surface,
            measurer,
            renderer: Renderer::new(StyleResolver::default()),
            images: HashMap::new(),
        })
    }

    /// Make a decoded image available to border slots under `id`.
    pub fn register_image(&mut self, id: String, image: HtmlImageElement) {
        self.images.insert(id, image);
    }

    /// Forget an image. Slots still pointing at it resolve as broken.
    pub fn remove_image(&mut self, id: &str) -> bool {
        self.images.remove(id).is_some()
    }

    /// Render a delta (`{ops}` or an op array) with the given settings.
    ///
    /// Returns `{ width, height, lines }`.
    ///
    /// # Errors
    /// Returns an error if either value cannot be deserialized.
    pub fn render(&mut self, delta: JsValue, settings: JsValue) -> Result<JsValue, JsValue> {
        let ops = delta_ops(delta)?;
        let settings: RenderSettings = if settings.is_undefined() || settings.is_null() {
            RenderSettings::default()
        } else {
            serde_wasm_bindgen::from_value(settings)
                .map_err(|e| JsValue::from_str(&format!("Invalid settings: {e}")))?
        };

        let document = document_from_ops(&ops);
        let config = build_render_config(&settings, &self.images);
        let report = self
            .renderer
            .render(&mut self.surface, &document, &config, &self.measurer);

        serde_wasm_bindgen::to_value(&RenderSummary {
            width: report.width,
            height: report.height,
            lines: report.lines.len(),
        })
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// The canvas as a `data:image/png;base64,...` URL.
    ///
    /// # Errors
    /// Returns an error if the canvas cannot be encoded.
    pub fn export_png(&self) -> Result<String, JsValue> {
        Ok(self.surface.to_png_data_url()?)
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Drop memoized font metrics, e.g. after a web font finished loading.
    pub fn clear_font_cache(&mut self) {
        self.renderer.clear_cache();
    }
}

fn delta_ops(value: JsValue) -> Result<Vec<DeltaOp>, JsValue> {
    let payload: DeltaPayload = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid delta: {e}")))?;
    Ok(payload.into_ops())
}
