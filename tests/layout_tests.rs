//! Line layout tests: wrapping, whitespace handling and alignment.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{doc, fixed_measure, plain_line};
use test_case::test_case;
use textframe::config::RenderConfig;
use textframe::layout::{layout_lines, LaidOutLine};
use textframe::render::{ImageRef, Renderer};
use textframe::style::StyleResolver;
use textframe::types::{Align, Line, Run, StyleAttributes};

const PARAGRAPH: &str = "the quick brown fox jumps over the lazy dog again and again";

fn lay_out(lines: &[Line], max_width: f64, wrap: bool) -> Vec<LaidOutLine> {
    layout_lines(lines, max_width, wrap, &StyleResolver::default(), &fixed_measure)
}

fn joined(lines: &[LaidOutLine]) -> String {
    lines
        .iter()
        .flat_map(|l| l.tokens.iter().map(|t| t.text.as_str()))
        .collect()
}

// ============================================================================
// Wrapping
// ============================================================================

#[test_case(40.0, 60.0 ; "narrow to wider")]
#[test_case(60.0, 120.0 ; "double width")]
#[test_case(100.0, 300.0 ; "several words per line")]
#[test_case(300.0, 1000.0 ; "wide enough for one line")]
fn test_wider_limit_never_adds_lines(narrow: f64, wide: f64) {
    let lines = vec![plain_line(PARAGRAPH, Align::Left)];
    let narrow_out = lay_out(&lines, narrow, true);
    let wide_out = lay_out(&lines, wide, true);
    assert!(wide_out.len() <= narrow_out.len());
}

#[test_case(10.0 ; "tiny limit")]
#[test_case(75.0 ; "mid limit")]
#[test_case(10_000.0 ; "huge limit")]
fn test_text_survives_wrapping(max_width: f64) {
    let lines = vec![plain_line(PARAGRAPH, Align::Left)];
    let out = lay_out(&lines, max_width, true);
    assert_eq!(joined(&out), PARAGRAPH);
}

#[test_case(10.0 ; "narrower than any word")]
#[test_case(35.0 ; "short words fit")]
#[test_case(55.0 ; "a word or two")]
#[test_case(90.0 ; "several words")]
#[test_case(150.0 ; "wider than the long word")]
#[test_case(400.0 ; "whole sentence")]
fn test_wrapped_lines_fit_unless_single_word(max_width: f64) {
    let lines = vec![
        plain_line(PARAGRAPH, Align::Left),
        plain_line("  an antidisestablishment  tale of  wide   gaps ", Align::Left),
    ];
    for line in lay_out(&lines, max_width, true) {
        let kept = line
            .tokens
            .iter()
            .rposition(|t| !t.is_blank())
            .map_or(0, |last| last + 1);
        let content = &line.tokens[..kept];
        let width: f64 = content.iter().map(|t| t.width).sum();
        let words = content.iter().filter(|t| !t.is_blank()).count();
        assert!(
            width <= max_width || words == 1,
            "line {:?} is {width}px wide with {words} words at limit {max_width}",
            content.iter().map(|t| t.text.as_str()).collect::<String>()
        );
    }
}

#[test]
fn test_wrap_disabled_ignores_limit() {
    let lines = vec![plain_line(PARAGRAPH, Align::Left)];
    let out = lay_out(&lines, 10.0, false);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].width, 10.0 * PARAGRAPH.len() as f64);
}

#[test]
fn test_line_width_is_token_sum() {
    let lines = vec![plain_line(PARAGRAPH, Align::Left)];
    for line in lay_out(&lines, 90.0, true) {
        let sum: f64 = line.tokens.iter().map(|t| t.width).sum();
        assert_eq!(line.width, sum);
    }
}

#[test]
fn test_no_wrapped_line_starts_with_whitespace() {
    let lines = vec![plain_line("aa   bb   cc   dd", Align::Left)];
    let out = lay_out(&lines, 45.0, true);
    assert!(out.len() > 1);
    for line in &out[1..] {
        assert!(!line.tokens[0].is_blank());
    }
}

// ============================================================================
// Whitespace
// ============================================================================

#[test_case("          " ; "spaces")]
#[test_case("\t\t\t\t\t\t" ; "tabs")]
#[test_case(" \t \t \t \t " ; "mixed")]
fn test_whitespace_only_line_stays_whole(text: &str) {
    let lines = vec![plain_line(text, Align::Left)];
    let out = lay_out(&lines, 5.0, true);
    assert_eq!(out.len(), 1);
    assert_eq!(joined(&out), text);
}

#[test]
fn test_blank_paragraph_keeps_height() {
    let lines = vec![
        plain_line("above", Align::Left),
        plain_line("", Align::Left),
        plain_line("below", Align::Left),
    ];
    let out = lay_out(&lines, 500.0, true);
    assert_eq!(out.len(), 3);
    assert!(out[1].tokens.is_empty());
    assert_eq!(out[1].width, 0.0);
    assert_eq!(out[1].line_height, 24.0);
}

#[test]
fn test_blank_paragraph_height_uses_run_size() {
    let big = StyleAttributes {
        size: Some("huge".to_string()),
        ..Default::default()
    };
    let lines = vec![Line::new(vec![Run::new("", big)], Align::Left)];
    let out = lay_out(&lines, 500.0, true);
    assert_eq!(out[0].line_height, (32.0_f64 * 1.35).round());
}

#[test]
fn test_mixed_sizes_take_tallest() {
    let large = StyleAttributes {
        size: Some("large".to_string()),
        ..Default::default()
    };
    let lines = vec![Line::new(
        vec![Run::plain("small "), Run::new("LARGE", large)],
        Align::Left,
    )];
    let out = lay_out(&lines, 500.0, true);
    assert_eq!(out[0].line_height, (24.0_f64 * 1.35).round());
}

// ============================================================================
// Alignment through the renderer
// ============================================================================

#[test]
fn test_short_line_centers_within_own_width() {
    let config: RenderConfig<ImageRef> = RenderConfig {
        content_width: 400.0,
        ..Default::default()
    };
    let document = doc(vec![plain_line("centered", Align::Center)]);
    let renderer = Renderer::default();
    let lines = renderer.layout(&document, &config, &fixed_measure);
    let geometry = renderer.measure(&lines, &config, &fixed_measure);

    assert_eq!(geometry.alignment_width, 80.0);
    assert_eq!(geometry.line_starts[0], geometry.text_start_x);
}

#[test]
fn test_right_alignment_against_widest_line() {
    let config: RenderConfig<ImageRef> = RenderConfig::default();
    let document = doc(vec![
        plain_line("a much longer line", Align::Left),
        plain_line("short", Align::Right),
    ]);
    let renderer = Renderer::default();
    let lines = renderer.layout(&document, &config, &fixed_measure);
    let geometry = renderer.measure(&lines, &config, &fixed_measure);

    let long_end = geometry.line_starts[0] + lines[0].width;
    let short_end = geometry.line_starts[1] + lines[1].width;
    assert_eq!(long_end, short_end);
}
