//! Paints laid-out text and its border onto a surface.
//!
//! Paint order is fixed: clear, canvas background, border background,
//! border, highlighted text, then underlines on top of everything.

use crate::config::RenderConfig;
use crate::layout::{baseline_y, underline_stroke_width, underline_y, CanvasGeometry, LaidOutLine};
use crate::measure::TextMeasurer;
use crate::types::BackgroundMode;

use super::backend::Surface;
use super::border::{draw_border, rounded_rect_path};
use super::cache::FontMetricsCache;

/// Paint one frame. The surface must already have the geometry's size.
pub fn paint<S: Surface, M: TextMeasurer + ?Sized>(
    surface: &mut S,
    lines: &[LaidOutLine],
    geometry: &CanvasGeometry,
    config: &RenderConfig<S::Image>,
    metrics: &mut FontMetricsCache,
    measurer: &M,
) {
    let width = f64::from(geometry.width);
    let height = f64::from(geometry.height);

    surface.clear_rect(0.0, 0.0, width, height);
    if config.background.mode == BackgroundMode::Solid {
        surface.fill_rect(0.0, 0.0, width, height, &config.background.color);
    }

    if let Some(rect) = geometry.border_rect {
        let border = &config.border;
        if border.background_mode == BackgroundMode::Solid {
            rounded_rect_path(surface, rect, border.radius);
            surface.fill(&border.background_color);
        }
        draw_border(surface, border, rect);
    }

    paint_text(surface, lines, geometry, metrics, measurer);
    paint_underlines(surface, lines, geometry);
}

fn paint_text<S: Surface + ?Sized, M: TextMeasurer + ?Sized>(
    surface: &mut S,
    lines: &[LaidOutLine],
    geometry: &CanvasGeometry,
    metrics: &mut FontMetricsCache,
    measurer: &M,
) {
    for ((line, &start), &top) in lines
        .iter()
        .zip(&geometry.line_starts)
        .zip(&geometry.line_tops)
    {
        let mut x = start;
        for token in &line.tokens {
            let baseline = baseline_y(top, token.style.font_size);

            if let Some(background) = token.style.background.as_deref() {
                let band = metrics.get_or_measure(&token.font, measurer);
                surface.fill_rect(
                    x,
                    baseline - band.ascent,
                    token.width,
                    band.height(),
                    background,
                );
            }

            if !token.is_blank() {
                surface.fill_text(&token.text, &token.font, &token.style.color, x, baseline);
            }
            x += token.width;
        }
    }
}

fn paint_underlines<S: Surface + ?Sized>(
    surface: &mut S,
    lines: &[LaidOutLine],
    geometry: &CanvasGeometry,
) {
    for ((line, &start), &top) in lines
        .iter()
        .zip(&geometry.line_starts)
        .zip(&geometry.line_tops)
    {
        let mut x = start;
        for token in &line.tokens {
            if token.style.underline && !token.is_blank() {
                let size = token.style.font_size;
                let y = underline_y(top, size);
                surface.begin_path();
                surface.move_to(x, y);
                surface.line_to(x + token.width, y);
                surface.stroke(underline_stroke_width(size), &token.style.color);
            }
            x += token.width;
        }
    }
}
