//! Common test utilities for textframe integration tests.
//!
//! Deterministic measurers, document builders and a one-call render helper
//! over the recording surface.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

use std::cell::Cell;

use textframe::config::RenderConfig;
use textframe::measure::{TextMeasurer, TextMetrics};
use textframe::render::{ImageRef, RecordingSurface, RenderReport, Renderer};
use textframe::types::{Align, Document, ImageSlot, Line, Run, SlotStatus, StyleAttributes};

/// 10px per character, fixed 14px ascent and 4px descent.
pub fn fixed_measure(text: &str, _font: &str) -> TextMetrics {
    TextMetrics {
        width: 10.0 * text.chars().count() as f64,
        ascent: Some(14.0),
        descent: Some(4.0),
    }
}

/// Wraps [`fixed_measure`] and counts calls.
#[derive(Default)]
pub struct CountingMeasurer {
    pub calls: Cell<usize>,
    /// Calls sampling the highlight band glyphs.
    pub band_calls: Cell<usize>,
}

impl TextMeasurer for CountingMeasurer {
    fn measure(&self, text: &str, font: &str) -> TextMetrics {
        self.calls.set(self.calls.get() + 1);
        if text == "Mg" {
            self.band_calls.set(self.band_calls.get() + 1);
        }
        fixed_measure(text, font)
    }
}

pub fn plain_line(text: &str, align: Align) -> Line {
    Line::new(vec![Run::plain(text)], align)
}

pub fn doc(lines: Vec<Line>) -> Document {
    Document::new(lines)
}

pub fn highlighted(text: &str, color: &str) -> Run {
    Run::new(
        text,
        StyleAttributes {
            background: Some(color.to_string()),
            ..Default::default()
        },
    )
}

pub fn underlined(text: &str) -> Run {
    Run::new(
        text,
        StyleAttributes {
            underline: Some(true),
            ..Default::default()
        },
    )
}

pub fn ready_slot(id: &str, width: f64, height: f64) -> ImageSlot<ImageRef> {
    ImageSlot {
        image: Some(ImageRef::new(id, width, height)),
        status: SlotStatus::Ready,
        ..Default::default()
    }
}

pub fn broken_slot() -> ImageSlot<ImageRef> {
    ImageSlot {
        status: SlotStatus::Broken,
        ..Default::default()
    }
}

/// Render `document` with a fresh renderer and surface.
pub fn render(
    document: &Document,
    config: &RenderConfig<ImageRef>,
) -> (RenderReport, RecordingSurface) {
    let mut surface = RecordingSurface::default();
    let report = Renderer::default().render(&mut surface, document, config, &fixed_measure);
    (report, surface)
}
