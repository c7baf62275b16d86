//! Greedy line layout over styled runs.

use serde::Serialize;

use crate::measure::TextMeasurer;
use crate::style::{ResolvedStyle, StyleResolver};
use crate::types::{Align, Line};

use super::tokenizer::tokenize;

/// Line height is the largest font size on the line times this factor.
pub const LINE_HEIGHT_FACTOR: f64 = 1.35;

/// Rounded line height for a font size.
pub fn line_height_for(font_size: f64) -> f64 {
    (font_size * LINE_HEIGHT_FACTOR).round()
}

/// A measured token on a laid-out line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    pub style: ResolvedStyle,
    pub font: String,
    pub width: f64,
}

impl Token {
    /// Whether the token is whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One visual line after wrapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaidOutLine {
    pub align: Align,
    pub tokens: Vec<Token>,
    /// Sum of token widths.
    pub width: f64,
    pub line_height: f64,
}

struct Accumulator {
    tokens: Vec<Token>,
    width: f64,
    max_font_size: f64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            width: 0.0,
            max_font_size: 0.0,
        }
    }

    fn push(&mut self, token: Token) {
        self.width += token.width;
        self.max_font_size = self.max_font_size.max(token.style.font_size);
        self.tokens.push(token);
    }

    /// Emit the accumulated tokens and reset. `empty_size` sizes a line with
    /// no tokens.
    fn flush(&mut self, align: Align, empty_size: f64) -> LaidOutLine {
        let size = if self.tokens.is_empty() {
            empty_size
        } else {
            self.max_font_size
        };
        let line = LaidOutLine {
            align,
            tokens: std::mem::take(&mut self.tokens),
            width: self.width,
            line_height: line_height_for(size),
        };
        self.width = 0.0;
        self.max_font_size = 0.0;
        line
    }
}

/// Lay out document lines into visual lines.
///
/// With `wrap_enabled`, a non-blank token that would push the line past
/// `max_width` starts a new line, unless it is the first token on the line.
/// Whitespace never triggers a break. Every document line yields at least
/// one visual line, so blank paragraphs keep their height.
pub fn layout_lines<M: TextMeasurer + ?Sized>(
    lines: &[Line],
    max_width: f64,
    wrap_enabled: bool,
    resolver: &StyleResolver,
    measurer: &M,
) -> Vec<LaidOutLine> {
    let mut out = Vec::with_capacity(lines.len());

    for line in lines {
        let first_out = out.len();
        let mut acc = Accumulator::new();
        let mut largest_run_size: Option<f64> = None;

        for run in &line.runs {
            let style = resolver.resolve(&run.attributes);
            let font = style.font_string();
            largest_run_size = Some(largest_run_size.map_or(style.font_size, |s| s.max(style.font_size)));

            for piece in tokenize(&run.text) {
                let width = measurer.measure(piece, &font).width.max(0.0);
                let blank = piece.trim().is_empty();

                if wrap_enabled && acc.width + width > max_width && !acc.tokens.is_empty() && !blank
                {
                    out.push(acc.flush(line.align, resolver.default_size()));
                }

                acc.push(Token {
                    text: piece.to_string(),
                    style: style.clone(),
                    font: font.clone(),
                    width,
                });
            }
        }

        if !acc.tokens.is_empty() || out.len() == first_out {
            let empty_size = largest_run_size.unwrap_or_else(|| resolver.default_size());
            out.push(acc.flush(line.align, empty_size));
        }

        log::trace!(
            "laid out paragraph into {} visual line(s)",
            out.len() - first_out
        );
    }

    out
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
    use crate::measure::TextMetrics;
    use crate::types::{Run, StyleAttributes};

    /// 10px per character regardless of font.
    fn ten_per_char(text: &str, _font: &str) -> TextMetrics {
        TextMetrics::width_only(10.0 * text.chars().count() as f64)
    }

    fn texts(line: &LaidOutLine) -> Vec<&str> {
        line.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_no_wrap_keeps_one_line() {
        let lines = vec![Line::new(vec![Run::plain("aaa bbb ccc")], Align::Left)];
        let out = layout_lines(&lines, 50.0, false, &StyleResolver::default(), &ten_per_char);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].width, 110.0);
        assert_eq!(out[0].line_height, 24.0);
    }

    #[test]
    fn test_wrap_breaks_before_word() {
        let lines = vec![Line::new(vec![Run::plain("aaa bbb ccc")], Align::Center)];
        let out = layout_lines(&lines, 75.0, true, &StyleResolver::default(), &ten_per_char);
        assert_eq!(out.len(), 2);
        // Trailing whitespace stays on the line even past the limit.
        assert_eq!(texts(&out[0]), vec!["aaa", " ", "bbb", " "]);
        assert_eq!(out[0].width, 80.0);
        assert_eq!(texts(&out[1]), vec!["ccc"]);
        assert!(out.iter().all(|l| l.align == Align::Center));
    }

    #[test]
    fn test_overlong_word_sits_alone() {
        let lines = vec![Line::new(vec![Run::plain("a enormousword b")], Align::Left)];
        let out = layout_lines(&lines, 40.0, true, &StyleResolver::default(), &ten_per_char);
        assert_eq!(texts(&out[0]), vec!["a", " "]);
        assert_eq!(texts(&out[1]), vec!["enormousword", " "]);
        assert_eq!(texts(&out[2]), vec!["b"]);
    }

    #[test]
    fn test_leading_whitespace_never_makes_empty_line() {
        let lines = vec![Line::new(vec![Run::plain("      x")], Align::Left)];
        let out = layout_lines(&lines, 30.0, true, &StyleResolver::default(), &ten_per_char);
        assert_eq!(out.len(), 2);
        assert_eq!(texts(&out[0]), vec!["      "]);
        assert_eq!(texts(&out[1]), vec!["x"]);
        assert!(out.iter().all(|l| !l.tokens.is_empty()));
    }

    #[test]
    fn test_whitespace_only_line_never_splits() {
        let lines = vec![Line::new(
            vec![Run::plain("     "), Run::plain("\t  ")],
            Align::Left,
        )];
        let out = layout_lines(&lines, 5.0, true, &StyleResolver::default(), &ten_per_char);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tokens.len(), 2);
    }

    #[test]
    fn test_blank_paragraph_takes_height_of_its_run() {
        let big = StyleAttributes {
            size: Some("huge".to_string()),
            ..Default::default()
        };
        let lines = vec![
            Line::new(vec![Run::new("", big)], Align::Left),
            Line::new(Vec::new(), Align::Right),
        ];
        let out = layout_lines(&lines, 100.0, true, &StyleResolver::default(), &ten_per_char);
        assert_eq!(out.len(), 2);
        assert!(out[0].tokens.is_empty());
        assert_eq!(out[0].line_height, (32.0_f64 * 1.35).round());
        assert_eq!(out[1].width, 0.0);
        assert_eq!(out[1].line_height, 24.0);
        assert_eq!(out[1].align, Align::Right);
    }

    #[test]
    fn test_mixed_sizes_use_largest_for_line_height() {
        let large = StyleAttributes {
            size: Some("large".to_string()),
            bold: Some(true),
            ..Default::default()
        };
        let lines = vec![Line::new(
            vec![Run::plain("small "), Run::new("BIG", large)],
            Align::Left,
        )];
        let out = layout_lines(&lines, 500.0, true, &StyleResolver::default(), &ten_per_char);
        assert_eq!(out[0].line_height, (24.0_f64 * 1.35).round());
        assert_eq!(out[0].tokens[2].font, "bold 24px sans-serif");
    }

    #[test]
    fn test_wrapped_line_height_resets() {
        let large = StyleAttributes {
            size: Some("large".to_string()),
            ..Default::default()
        };
        let lines = vec![Line::new(
            vec![Run::new("BIG ", large), Run::plain("small")],
            Align::Left,
        )];
        let out = layout_lines(&lines, 45.0, true, &StyleResolver::default(), &ten_per_char);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].line_height, 32.0);
        assert_eq!(out[1].line_height, 24.0);
    }
}
