//! Rendering pipeline tests
//!
//! Drives the renderer end to end over the recording surface: paint order,
//! idempotence, highlight band caching, and the delta and settings entry
//! points.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use std::collections::HashMap;

use common::{doc, fixed_measure, highlighted, plain_line, render, underlined, CountingMeasurer};
use textframe::config::{build_render_config, RenderConfig, RenderSettings};
use textframe::measure::TextMetrics;
use textframe::render::{
    export_png, render_display_list, DrawCommand, ImageRef, RecordingSurface, Renderer,
};
use textframe::types::{Align, BackgroundMode, CanvasBackground, ColorMode, Line, Run};
use textframe::TextframeError;

fn position(commands: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
    commands.iter().position(pred).unwrap()
}

// ============================================================================
// Paint order
// ============================================================================

#[test]
fn test_paint_order() {
    let document = doc(vec![Line::new(
        vec![highlighted("marked", "#FFFF00"), Run::plain(" "), underlined("under")],
        Align::Left,
    )]);
    let (report, surface) = render(&document, &RenderConfig::default());
    let cmds = surface.commands();

    assert_eq!(
        cmds[0],
        DrawCommand::Resize {
            width: report.width,
            height: report.height
        }
    );
    assert!(matches!(cmds[1], DrawCommand::ClearRect { .. }));
    assert!(matches!(&cmds[2], DrawCommand::FillRect { color, .. } if color == "#FFFFFF"));

    let border_bg = position(cmds, |c| matches!(c, DrawCommand::Fill { .. }));
    let border = position(cmds, |c| matches!(c, DrawCommand::Stroke { line_width, .. } if *line_width == 4.0));
    let highlight = position(cmds, |c| {
        matches!(c, DrawCommand::FillRect { color, .. } if color == "#FFFF00")
    });
    let first_text = position(cmds, |c| matches!(c, DrawCommand::FillText { .. }));
    let last_text = cmds
        .iter()
        .rposition(|c| matches!(c, DrawCommand::FillText { .. }))
        .unwrap();
    let underline = cmds
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Stroke { .. }))
        .unwrap();

    assert!(border_bg < border);
    assert!(border < highlight);
    assert!(highlight < first_text);
    assert!(last_text < underline);
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn test_blank_tokens_are_not_drawn_as_text() {
    let document = doc(vec![plain_line("a   b", Align::Left)]);
    let (_, surface) = render(&document, &RenderConfig::default());
    assert_eq!(surface.texts(), vec!["a", "b"]);
}

#[test]
fn test_text_sits_on_baseline() {
    let document = doc(vec![plain_line("Hi there", Align::Left)]);
    let (report, surface) = render(&document, &RenderConfig::default());
    let top = report.geometry.line_tops[0];
    for cmd in surface.commands() {
        if let DrawCommand::FillText { y, font, .. } = cmd {
            assert_eq!(*y, top + 18.0);
            assert_eq!(font, "18px sans-serif");
        }
    }
}

#[test]
fn test_highlight_band_covers_ascent_and_descent() {
    let document = doc(vec![Line::new(vec![highlighted("hi", "#00FF00")], Align::Left)]);
    let (report, surface) = render(&document, &RenderConfig::default());
    let baseline = report.geometry.line_tops[0] + 18.0;
    let band = surface
        .commands()
        .iter()
        .find_map(|c| match c {
            DrawCommand::FillRect { x, y, w, h, color } if color == "#00FF00" => {
                Some((*x, *y, *w, *h))
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(band, (report.geometry.line_starts[0], baseline - 14.0, 20.0, 18.0));
}

#[test]
fn test_transparent_backgrounds_skip_fills() {
    let mut config: RenderConfig<ImageRef> = RenderConfig::default();
    config.background = CanvasBackground {
        mode: BackgroundMode::Transparent,
        color: "#FFFFFF".to_string(),
    };
    config.border.background_mode = BackgroundMode::Transparent;

    let (_, surface) = render(&doc(vec![plain_line("x", Align::Left)]), &config);
    assert!(!surface
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::FillRect { .. } | DrawCommand::Fill { .. })));
}

#[test]
fn test_disabled_border_paints_no_stroke() {
    let mut config: RenderConfig<ImageRef> = RenderConfig::default();
    config.border.enabled = false;
    let (_, surface) = render(&doc(vec![plain_line("x", Align::Left)]), &config);
    assert!(surface.strokes().is_empty());
}

// ============================================================================
// Idempotence and caching
// ============================================================================

#[test]
fn test_render_is_idempotent() {
    let document = doc(vec![
        Line::new(vec![highlighted("one", "#FFEE00"), underlined(" two")], Align::Center),
        plain_line("three four five six seven eight nine ten", Align::Right),
    ]);
    let config: RenderConfig<ImageRef> = RenderConfig {
        content_width: 120.0,
        ..Default::default()
    };

    let mut renderer = Renderer::default();
    let mut first = RecordingSurface::default();
    let a = renderer.render(&mut first, &document, &config, &fixed_measure);
    let mut second = RecordingSurface::default();
    let b = renderer.render(&mut second, &document, &config, &fixed_measure);

    assert_eq!(a, b);
    assert_eq!(first.commands(), second.commands());

    renderer.clear_cache();
    let mut third = RecordingSurface::default();
    let c = renderer.render(&mut third, &document, &config, &fixed_measure);
    assert_eq!(a, c);
    assert_eq!(first.commands(), third.commands());
}

#[test]
fn test_highlight_metrics_measured_once_per_font() {
    let runs: Vec<Run> = (0..20).map(|i| highlighted(&format!("w{i} "), "#FF0")).collect();
    let document = doc(vec![Line::new(runs, Align::Left)]);
    let measurer = CountingMeasurer::default();
    let config: RenderConfig<ImageRef> = RenderConfig::default();

    let mut renderer = Renderer::default();
    for _ in 0..5 {
        let mut surface = RecordingSurface::default();
        renderer.render(&mut surface, &document, &config, &measurer);
    }

    assert_eq!(measurer.band_calls.get(), 1);
    assert_eq!(renderer.cached_fonts(), 1);
}

#[test]
fn test_clear_cache_picks_up_new_measurer() {
    let tall = |text: &str, font: &str| TextMetrics {
        ascent: Some(20.0),
        descent: Some(6.0),
        ..fixed_measure(text, font)
    };
    let band_height = |surface: &RecordingSurface| {
        surface
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::FillRect { h, color, .. } if color == "#00FF00" => Some(*h),
                _ => None,
            })
            .unwrap()
    };
    let document = doc(vec![Line::new(vec![highlighted("hi", "#00FF00")], Align::Left)]);
    let config: RenderConfig<ImageRef> = RenderConfig::default();
    let mut renderer = Renderer::default();

    let mut surface = RecordingSurface::default();
    renderer.render(&mut surface, &document, &config, &fixed_measure);
    assert_eq!(band_height(&surface), 18.0);

    // Metrics are keyed by font only, so the first measurer's band sticks.
    let mut surface = RecordingSurface::default();
    renderer.render(&mut surface, &document, &config, &tall);
    assert_eq!(band_height(&surface), 18.0);

    renderer.clear_cache();
    let mut surface = RecordingSurface::default();
    renderer.render(&mut surface, &document, &config, &tall);
    assert_eq!(band_height(&surface), 26.0);
}

// ============================================================================
// Entry points
// ============================================================================

#[test]
fn test_render_delta_splits_lines_and_alignment() {
    let delta = r#"{"ops": [
        {"insert": "Title"},
        {"insert": "\n", "attributes": {"align": "center"}},
        {"insert": "body", "attributes": {"bold": true}},
        {"insert": "\n"}
    ]}"#;
    let config: RenderConfig<ImageRef> = RenderConfig::default();
    let mut surface = RecordingSurface::default();
    let report = Renderer::default()
        .render_delta(&mut surface, delta, &config, &fixed_measure)
        .unwrap();

    assert_eq!(report.lines.len(), 2);
    assert_eq!(report.lines[0].align, Align::Center);
    assert_eq!(report.lines[1].tokens[0].font, "bold 18px sans-serif");
    assert_eq!(surface.texts(), vec!["Title", "body"]);
}

#[test]
fn test_render_delta_rejects_bad_json() {
    let config: RenderConfig<ImageRef> = RenderConfig::default();
    let mut surface = RecordingSurface::default();
    let err = Renderer::default()
        .render_delta(&mut surface, "{not json", &config, &fixed_measure)
        .unwrap_err();
    assert!(matches!(err, TextframeError::Json(_)));
    assert!(surface.commands().is_empty());
}

#[test]
fn test_settings_with_images_render_slots() {
    let settings = RenderSettings::from_json(
        r#"{
            "border": {
                "colorMode": "images",
                "width": 10,
                "imageBorder": {
                    "corners": {
                        "topLeft": {"imageId": "star"},
                        "topRight": {"imageId": "star", "flipX": true},
                        "bottomLeft": {"imageId": "missing"}
                    },
                    "sides": {"bottom": {"imageId": "rope"}},
                    "sideMode": "repeat"
                }
            }
        }"#,
    )
    .unwrap();
    let mut images = HashMap::new();
    images.insert("star".to_string(), ImageRef::new("star", 20.0, 20.0));
    images.insert("rope".to_string(), ImageRef::new("rope", 40.0, 10.0));

    let config = build_render_config(&settings, &images);
    assert_eq!(config.border.color_mode, ColorMode::Images);

    let (_, surface) = render(&doc(vec![plain_line("framed", Align::Left)]), &config);
    let draws = surface.image_draws();
    assert_eq!(draws.iter().filter(|d| d.0 == "star").count(), 2);
    assert!(draws.iter().filter(|d| d.0 == "rope").all(|d| d.3 == 40.0));
    assert!(surface.strokes().iter().all(|s| s.0 != 10.0));
    assert_eq!(surface.save_depth(), 0);
}

#[test]
fn test_display_list_serializes() {
    let list = render_display_list(
        r#"[{"insert": "hello world\n"}]"#,
        &RenderSettings::default(),
        &HashMap::new(),
    )
    .unwrap();
    assert_eq!(list.lines.len(), 1);
    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json["width"], list.width);
    assert_eq!(json["commands"][0]["op"], "resize");
}

#[test]
fn test_recording_surface_cannot_export_png() {
    let surface = RecordingSurface::new(4, 4);
    assert!(matches!(export_png(&surface), Err(TextframeError::Export(_))));
}
