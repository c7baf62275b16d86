//! Render orchestration: document and configuration in, painted surface out.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::{build_render_config, RenderConfig, RenderSettings};
use crate::delta::document_from_json;
use crate::error::Result;
use crate::layout::{
    compute_geometry, layout_lines, measure_vertical_bounds, text_origin, CanvasGeometry,
    LaidOutLine,
};
use crate::measure::{ApproxMeasurer, TextMeasurer};
use crate::style::StyleResolver;
use crate::types::Document;

use super::backend::Surface;
use super::cache::FontMetricsCache;
use super::export::png_bytes_from_data_url;
use super::painter::paint;
use super::recording::{DrawCommand, ImageRef, RecordingSurface};

/// Outcome of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderReport {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<LaidOutLine>,
    pub geometry: CanvasGeometry,
}

/// Drives layout, measurement and painting.
///
/// The only state kept between renders is the font metrics cache, so
/// rendering the same inputs twice paints the same frame. That cache is
/// keyed by font string alone: call [`Renderer::clear_cache`] before
/// rendering with a different measurer.
#[derive(Debug, Default)]
pub struct Renderer {
    resolver: StyleResolver,
    metrics: FontMetricsCache,
}

impl Renderer {
    pub fn new(resolver: StyleResolver) -> Self {
        Self {
            resolver,
            metrics: FontMetricsCache::default(),
        }
    }

    pub fn resolver(&self) -> &StyleResolver {
        &self.resolver
    }

    /// Wrap the document into visual lines.
    pub fn layout<I, M: TextMeasurer + ?Sized>(
        &self,
        document: &Document,
        config: &RenderConfig<I>,
        measurer: &M,
    ) -> Vec<LaidOutLine> {
        layout_lines(
            &document.lines,
            config.content_width,
            config.wrap_enabled,
            &self.resolver,
            measurer,
        )
    }

    /// Measure the laid-out lines and place them on the canvas.
    pub fn measure<I, M: TextMeasurer + ?Sized>(
        &self,
        lines: &[LaidOutLine],
        config: &RenderConfig<I>,
        measurer: &M,
    ) -> CanvasGeometry {
        let (_, text_start_y) = text_origin(&config.border, &config.canvas_padding);
        let bounds = measure_vertical_bounds(lines, text_start_y, measurer);
        compute_geometry(
            lines,
            &config.border,
            &config.canvas_padding,
            config.content_width,
            bounds,
        )
    }

    /// Lay out, size the surface and paint.
    ///
    /// Highlight bands reuse metrics cached from earlier calls, whichever
    /// measurer produced them.
    pub fn render<S: Surface, M: TextMeasurer + ?Sized>(
        &mut self,
        surface: &mut S,
        document: &Document,
        config: &RenderConfig<S::Image>,
        measurer: &M,
    ) -> RenderReport {
        let lines = self.layout(document, config, measurer);
        let geometry = self.measure(&lines, config, measurer);

        surface.resize(geometry.width, geometry.height);
        paint(surface, &lines, &geometry, config, &mut self.metrics, measurer);

        log::debug!(
            "rendered {} line(s) into {}x{} canvas",
            lines.len(),
            geometry.width,
            geometry.height
        );

        RenderReport {
            width: geometry.width,
            height: geometry.height,
            lines,
            geometry,
        }
    }

    /// Render a delta given as JSON.
    pub fn render_delta<S: Surface, M: TextMeasurer + ?Sized>(
        &mut self,
        surface: &mut S,
        delta_json: &str,
        config: &RenderConfig<S::Image>,
        measurer: &M,
    ) -> Result<RenderReport> {
        let document = document_from_json(delta_json)?;
        Ok(self.render(surface, &document, config, measurer))
    }

    /// Number of fonts with memoized metrics.
    pub fn cached_fonts(&self) -> usize {
        self.metrics.len()
    }

    /// Drop memoized font metrics. Required after switching measurers;
    /// otherwise only costs re-measurement.
    pub fn clear_cache(&mut self) {
        self.metrics.clear();
    }
}

/// Export the surface as PNG bytes.
pub fn export_png<S: Surface + ?Sized>(surface: &S) -> Result<Vec<u8>> {
    png_bytes_from_data_url(&surface.to_png_data_url()?)
}

/// Headless render result: size, lines and the recorded drawing calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<LaidOutLine>,
    pub commands: Vec<DrawCommand>,
}

/// Render a delta without a canvas.
///
/// Text is measured with [`ApproxMeasurer`] and drawing goes to a
/// [`RecordingSurface`]; `images` stands in for the image library.
pub fn render_display_list(
    delta_json: &str,
    settings: &RenderSettings,
    images: &HashMap<String, ImageRef>,
) -> Result<DisplayList> {
    let config = build_render_config(settings, images);
    let mut surface = RecordingSurface::default();
    let report = Renderer::default().render_delta(
        &mut surface,
        delta_json,
        &config,
        &ApproxMeasurer::default(),
    )?;
    Ok(DisplayList {
        width: report.width,
        height: report.height,
        lines: report.lines,
        commands: surface.into_commands(),
    })
}
