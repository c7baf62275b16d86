//! Vertical bounds measurement and canvas dimension calculation.
//!
//! Coordinates are CSS pixels with the origin at the canvas top-left. A
//! token's alphabetic baseline sits at `line_top + font_size`; painter and
//! measurer share [`baseline_y`] and [`underline_y`] so the measured box is
//! exactly what gets painted.

use serde::Serialize;

use crate::measure::TextMeasurer;
use crate::style::DEFAULT_FONT_SIZE;
use crate::types::{Align, BorderConfig, CanvasSizePadding, Rect};

use super::lines::LaidOutLine;

/// Blank tokens are measured with this glyph so they still have height.
const SENTINEL_GLYPH: &str = "M";
/// Gap between baseline and underline.
const UNDERLINE_OFFSET: f64 = 2.0;

/// Baseline of a token whose line starts at `line_top`.
pub fn baseline_y(line_top: f64, font_size: f64) -> f64 {
    line_top + font_size
}

/// Underline centre line for a token whose line starts at `line_top`.
pub fn underline_y(line_top: f64, font_size: f64) -> f64 {
    baseline_y(line_top, font_size) + UNDERLINE_OFFSET
}

pub fn underline_stroke_width(font_size: f64) -> f64 {
    (font_size / 14.0).max(1.0)
}

/// Inked vertical extent of the text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerticalBounds {
    pub min_y: f64,
    pub max_y: f64,
}

/// Measure the tight vertical box around the glyphs.
///
/// Lines are stacked from `text_start_y` by their line height. Underlined
/// non-blank tokens extend the box to the bottom of the underline stroke.
/// With nothing measured the box is one default font size tall.
pub fn measure_vertical_bounds<M: TextMeasurer + ?Sized>(
    lines: &[LaidOutLine],
    text_start_y: f64,
    measurer: &M,
) -> VerticalBounds {
    let mut y = text_start_y;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for line in lines {
        for token in &line.tokens {
            let size = token.style.font_size;
            let blank = token.is_blank();
            let sample = if blank { SENTINEL_GLYPH } else { token.text.as_str() };
            let metrics = measurer.measure(sample, &token.font);
            let baseline = baseline_y(y, size);
            min_y = min_y.min(baseline - metrics.ascent_or_fallback(size));
            max_y = max_y.max(baseline + metrics.descent_or_fallback(size));

            if token.style.underline && !blank {
                max_y = max_y.max(underline_y(y, size) + underline_stroke_width(size) / 2.0);
            }
        }
        y += line.line_height;
    }

    if min_y.is_finite() && max_y.is_finite() {
        VerticalBounds { min_y, max_y }
    } else {
        VerticalBounds {
            min_y: text_start_y,
            max_y: text_start_y + DEFAULT_FONT_SIZE,
        }
    }
}

/// Final canvas size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanvasDimensions {
    pub width: u32,
    pub height: u32,
}

/// Everything the painter needs to place content on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasGeometry {
    pub width: u32,
    pub height: u32,
    pub text_start_x: f64,
    pub text_start_y: f64,
    /// Width alignment is computed against: the widest line, capped at the
    /// configured content width.
    pub alignment_width: f64,
    /// Start X of every laid-out line.
    pub line_starts: Vec<f64>,
    /// Top Y of every laid-out line.
    pub line_tops: Vec<f64>,
    pub rendered_min_x: f64,
    pub rendered_max_x: f64,
    pub bounds: VerticalBounds,
    /// Border stroke centre line, when the border is enabled.
    pub border_rect: Option<Rect>,
}

/// Top-left of the text area.
pub fn text_origin<I>(border: &BorderConfig<I>, canvas_padding: &CanvasSizePadding) -> (f64, f64) {
    if border.enabled {
        let bw = sanitize(border.width);
        (
            sanitize(canvas_padding.left) + bw + sanitize(border.padding.left),
            sanitize(canvas_padding.top) + bw + sanitize(border.padding.top),
        )
    } else {
        (sanitize(canvas_padding.left), sanitize(canvas_padding.top))
    }
}

/// Start X of a line. Lines wider than the alignment width start flush left.
pub fn line_start_x(align: Align, text_start_x: f64, alignment_width: f64, line_width: f64) -> f64 {
    let slack = (alignment_width - line_width).max(0.0);
    match align {
        Align::Left => text_start_x,
        Align::Center => text_start_x + slack / 2.0,
        Align::Right => text_start_x + slack,
    }
}

/// Derive canvas size, line placement and the border rectangle.
///
/// Border disabled: the canvas hugs the rendered text plus canvas padding.
/// Border enabled: the content box is at least `max_content_width` wide, the
/// border stroke centre line sits half a stroke outside the text padding,
/// and the canvas adds the outer half stroke plus canvas padding.
pub fn compute_geometry<I>(
    lines: &[LaidOutLine],
    border: &BorderConfig<I>,
    canvas_padding: &CanvasSizePadding,
    max_content_width: f64,
    bounds: VerticalBounds,
) -> CanvasGeometry {
    let max_content_width = sanitize(max_content_width);
    let (text_start_x, text_start_y) = text_origin(border, canvas_padding);

    let widest = lines.iter().map(|l| l.width).fold(0.0_f64, f64::max);
    let alignment_width = max_content_width.min(widest);

    let mut line_starts = Vec::with_capacity(lines.len());
    let mut line_tops = Vec::with_capacity(lines.len());
    let mut rendered_min_x = f64::INFINITY;
    let mut rendered_max_x = f64::NEG_INFINITY;
    let mut y = text_start_y;
    for line in lines {
        let start = line_start_x(line.align, text_start_x, alignment_width, line.width);
        rendered_min_x = rendered_min_x.min(start);
        rendered_max_x = rendered_max_x.max(start + line.width);
        line_starts.push(start);
        line_tops.push(y);
        y += line.line_height;
    }
    if !rendered_min_x.is_finite() || !rendered_max_x.is_finite() {
        rendered_min_x = text_start_x;
        rendered_max_x = text_start_x;
    }

    let (width, height, border_rect) = if border.enabled {
        let bw = sanitize(border.width);
        let half = bw / 2.0;
        let text_pad = &border.padding;
        let content_right = rendered_max_x.max(text_start_x + max_content_width);

        let rect_x = sanitize(canvas_padding.left) + half;
        let rect_y = sanitize(canvas_padding.top) + half;
        let rect_right = content_right + sanitize(text_pad.right) + half;
        let rect_bottom = bounds.max_y + sanitize(text_pad.bottom) + half;
        let rect = Rect::new(rect_x, rect_y, rect_right - rect_x, rect_bottom - rect_y);

        (
            to_dimension(rect_right + half + sanitize(canvas_padding.right)),
            to_dimension(rect_bottom + half + sanitize(canvas_padding.bottom)),
            Some(rect),
        )
    } else {
        (
            to_dimension(rendered_max_x + sanitize(canvas_padding.right)),
            to_dimension(bounds.max_y + sanitize(canvas_padding.bottom)),
            None,
        )
    };

    CanvasGeometry {
        width,
        height,
        text_start_x,
        text_start_y,
        alignment_width,
        line_starts,
        line_tops,
        rendered_min_x,
        rendered_max_x,
        bounds,
        border_rect,
    }
}

/// Canvas width and height for the given lines and vertical bounds.
pub fn calculate_canvas_dimensions<I>(
    lines: &[LaidOutLine],
    border: &BorderConfig<I>,
    canvas_padding: &CanvasSizePadding,
    max_content_width: f64,
    bounds: VerticalBounds,
) -> CanvasDimensions {
    let geometry = compute_geometry(lines, border, canvas_padding, max_content_width, bounds);
    CanvasDimensions {
        width: geometry.width,
        height: geometry.height,
    }
}

/// Negative and non-finite lengths count as zero.
fn sanitize(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Round up to whole pixels, never below 1.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn to_dimension(v: f64) -> u32 {
    let v = v.ceil();
    if !v.is_finite() || v < 1.0 {
        1
    } else if v >= u32::MAX as f64 {
        u32::MAX
    } else {
        v as u32
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
    use crate::layout::Token;
    use crate::measure::TextMetrics;
    use crate::style::{StyleResolver, DEFAULT_FONT_SIZE};
    use crate::types::{Padding, StyleAttributes};

    fn token(text: &str, width: f64, underline: bool) -> Token {
        let mut style = StyleResolver::default().resolve(&StyleAttributes::default());
        style.underline = underline;
        Token {
            text: text.to_string(),
            font: style.font_string(),
            style,
            width,
        }
    }

    fn line(width: f64, align: Align, tokens: Vec<Token>) -> LaidOutLine {
        LaidOutLine {
            align,
            tokens,
            width,
            line_height: 24.0,
        }
    }

    fn no_metrics(_text: &str, _font: &str) -> TextMetrics {
        TextMetrics::width_only(0.0)
    }

    #[test]
    fn test_bounds_use_fallback_ratios() {
        let lines = vec![line(10.0, Align::Left, vec![token("Hi", 10.0, false)])];
        let b = measure_vertical_bounds(&lines, 10.0, &no_metrics);
        // baseline 28, ascent 14.4, descent 3.6
        assert!((b.min_y - 13.6).abs() < 1e-9);
        assert!((b.max_y - 31.6).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_underline_extends_bottom() {
        let lines = vec![line(10.0, Align::Left, vec![token("Hi", 10.0, true)])];
        let b = measure_vertical_bounds(&lines, 0.0, &no_metrics);
        // underline at 18 + 2, stroke 18/14
        let expected = 20.0 + (18.0 / 14.0) / 2.0;
        assert!((b.max_y - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_blank_underline_ignored_and_sentinel_used() {
        let seen = std::cell::RefCell::new(Vec::new());
        let measurer = |text: &str, _font: &str| {
            seen.borrow_mut().push(text.to_string());
            TextMetrics {
                width: 0.0,
                ascent: Some(12.0),
                descent: Some(1.0),
            }
        };
        let lines = vec![line(5.0, Align::Left, vec![token("   ", 5.0, true)])];
        let b = measure_vertical_bounds(&lines, 0.0, &measurer);
        assert_eq!(seen.borrow().as_slice(), ["M".to_string()]);
        assert_eq!(b.min_y, 6.0);
        assert_eq!(b.max_y, 19.0);
    }

    #[test]
    fn test_bounds_second_line_advances_by_line_height() {
        let lines = vec![
            line(0.0, Align::Left, Vec::new()),
            line(10.0, Align::Left, vec![token("x", 10.0, false)]),
        ];
        let b = measure_vertical_bounds(&lines, 0.0, &no_metrics);
        assert!((b.min_y - (24.0 + 18.0 - 14.4)).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_empty_document_fallback() {
        let lines = vec![line(0.0, Align::Left, Vec::new())];
        let b = measure_vertical_bounds(&lines, 7.0, &no_metrics);
        assert_eq!(b, VerticalBounds { min_y: 7.0, max_y: 7.0 + DEFAULT_FONT_SIZE });
    }

    #[test]
    fn test_dimension_formula_with_border() {
        let lines = vec![line(100.0, Align::Center, Vec::new())];
        let border: BorderConfig<()> = BorderConfig {
            enabled: true,
            width: 4.0,
            padding: Padding::new(10.0, 20.0, 10.0, 20.0),
            ..Default::default()
        };
        let canvas_padding = Padding::new(30.0, 50.0, 30.0, 50.0);
        let bounds = VerticalBounds { min_y: 44.0, max_y: 64.0 };
        let dims = calculate_canvas_dimensions(&lines, &border, &canvas_padding, 300.0, bounds);
        assert_eq!(dims.width, 448);
        assert_eq!(dims.height, 108);

        let g = compute_geometry(&lines, &border, &canvas_padding, 300.0, bounds);
        assert_eq!(g.text_start_x, 74.0);
        assert_eq!(g.text_start_y, 44.0);
        assert_eq!(g.border_rect, Some(Rect::new(52.0, 32.0, 344.0, 44.0)));
    }

    #[test]
    fn test_alignment_relative_to_widest_line() {
        let lines = vec![line(100.0, Align::Center, Vec::new())];
        let border: BorderConfig<()> = BorderConfig {
            enabled: false,
            ..Default::default()
        };
        let bounds = VerticalBounds { min_y: 0.0, max_y: 20.0 };
        let g = compute_geometry(&lines, &border, &Padding::uniform(0.0), 300.0, bounds);
        assert_eq!(g.alignment_width, 100.0);
        assert_eq!(g.line_starts, vec![0.0]);
    }

    #[test]
    fn test_center_and_right_against_widest() {
        let lines = vec![
            line(200.0, Align::Left, Vec::new()),
            line(100.0, Align::Center, Vec::new()),
            line(50.0, Align::Right, Vec::new()),
        ];
        let border: BorderConfig<()> = BorderConfig {
            enabled: false,
            ..Default::default()
        };
        let bounds = VerticalBounds { min_y: 0.0, max_y: 60.0 };
        let g = compute_geometry(&lines, &border, &Padding::uniform(10.0), 300.0, bounds);
        assert_eq!(g.line_starts, vec![10.0, 60.0, 160.0]);
        assert_eq!(g.line_tops, vec![10.0, 34.0, 58.0]);
    }

    #[test]
    fn test_border_disabled_hugs_content() {
        let lines = vec![line(120.5, Align::Left, Vec::new())];
        let border: BorderConfig<()> = BorderConfig {
            enabled: false,
            width: 40.0,
            padding: Padding::uniform(99.0),
            ..Default::default()
        };
        let pad = Padding::new(5.0, 7.0, 9.0, 11.0);
        let bounds = VerticalBounds { min_y: 5.0, max_y: 30.2 };
        let dims = calculate_canvas_dimensions(&lines, &border, &pad, 480.0, bounds);
        assert_eq!(dims.width, (11.0_f64 + 120.5 + 7.0).ceil() as u32);
        assert_eq!(dims.height, 40);
    }

    #[test]
    fn test_degenerate_input_is_at_least_one_pixel() {
        let border: BorderConfig<()> = BorderConfig {
            enabled: false,
            ..Default::default()
        };
        let bounds = VerticalBounds { min_y: 0.0, max_y: 0.0 };
        let dims = calculate_canvas_dimensions(&[], &border, &Padding::uniform(-5.0), -1.0, bounds);
        assert_eq!(dims, CanvasDimensions { width: 1, height: 1 });
    }
}
