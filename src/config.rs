//! Render settings and the immutable render configuration built from them.
//!
//! [`RenderSettings`] mirrors what a settings UI hands over: every field is
//! optional and values may be out of range. [`build_render_config`] turns it
//! into a complete [`RenderConfig`], resolving border-art slots against the
//! image library on the way.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TextframeError};
use crate::render::colors::{color_or, palette};
use crate::types::{
    BackgroundMode, BorderConfig, CanvasBackground, CanvasSizePadding, ColorMode, Corners,
    ImageBorder, ImageLibrary, Padding, RawImageSlot, SideMode, Sides, SizingStrategy,
    resolve_slot,
};

/// Default padding between the canvas edge and the border.
pub const DEFAULT_CANVAS_PADDING: f64 = 24.0;
/// Default maximum content width before wrapping.
pub const DEFAULT_CONTENT_WIDTH: f64 = 480.0;

/// Per-side padding where any side may be missing.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaddingSettings {
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
    #[serde(default)]
    pub left: Option<f64>,
}

impl PaddingSettings {
    fn resolve(&self, default: Padding) -> Padding {
        Padding {
            top: non_negative(self.top, default.top),
            right: non_negative(self.right, default.right),
            bottom: non_negative(self.bottom, default.bottom),
            left: non_negative(self.left, default.left),
        }
    }
}

/// Image border as stored by the border-assignment state.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImageBorderSettings {
    #[serde(default)]
    pub corners: Corners<RawImageSlot>,
    #[serde(default)]
    pub sides: Sides<RawImageSlot>,
    #[serde(default)]
    pub sizing_strategy: Option<SizingStrategy>,
    #[serde(default)]
    pub side_mode: Option<SideMode>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BorderSettings {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub color_mode: Option<ColorMode>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub inside_out_colors: Option<Vec<String>>,
    #[serde(default)]
    pub image_border: Option<ImageBorderSettings>,
    #[serde(default)]
    pub background_mode: Option<BackgroundMode>,
    #[serde(default)]
    pub background_color: Option<String>,
    /// Padding between the border and the text.
    #[serde(default)]
    pub padding: Option<PaddingSettings>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CanvasBackgroundSettings {
    #[serde(default)]
    pub mode: Option<BackgroundMode>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Raw settings for one render.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    #[serde(default)]
    pub border: Option<BorderSettings>,
    #[serde(default)]
    pub canvas_background: Option<CanvasBackgroundSettings>,
    #[serde(default)]
    pub canvas_padding: Option<PaddingSettings>,
    #[serde(default)]
    pub content_width: Option<f64>,
    #[serde(default)]
    pub wrap_enabled: Option<bool>,
}

impl RenderSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TextframeError::Settings(e.to_string()))
    }
}

/// Fully populated configuration for one render pass. Never mutated by the
/// renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig<I> {
    pub border: BorderConfig<I>,
    pub canvas_padding: CanvasSizePadding,
    pub background: CanvasBackground,
    /// Maximum line width before wrapping, and the minimum content box width
    /// when the border is enabled.
    pub content_width: f64,
    pub wrap_enabled: bool,
}

impl<I> Default for RenderConfig<I> {
    fn default() -> Self {
        Self {
            border: BorderConfig::default(),
            canvas_padding: Padding::uniform(DEFAULT_CANVAS_PADDING),
            background: CanvasBackground::default(),
            content_width: DEFAULT_CONTENT_WIDTH,
            wrap_enabled: true,
        }
    }
}

/// Build a [`RenderConfig`] from raw settings.
///
/// Missing, negative or non-finite numbers take their defaults, colors that
/// do not parse take the default color, and every image slot is resolved
/// against `library`.
pub fn build_render_config<L: ImageLibrary + ?Sized>(
    settings: &RenderSettings,
    library: &L,
) -> RenderConfig<L::Image> {
    let defaults: RenderConfig<L::Image> = RenderConfig::default();
    let border = settings
        .border
        .as_ref()
        .map_or_else(BorderConfig::default, |b| build_border(b, library));

    let background = settings
        .canvas_background
        .as_ref()
        .map_or_else(CanvasBackground::default, |bg| CanvasBackground {
            mode: bg.mode.unwrap_or_default(),
            color: color_or(bg.color.as_deref(), palette::WHITE),
        });

    let canvas_padding = settings
        .canvas_padding
        .map_or(defaults.canvas_padding, |p| p.resolve(defaults.canvas_padding));

    RenderConfig {
        border,
        canvas_padding,
        background,
        content_width: non_negative(settings.content_width, defaults.content_width),
        wrap_enabled: settings.wrap_enabled.unwrap_or(defaults.wrap_enabled),
    }
}

fn build_border<L: ImageLibrary + ?Sized>(
    settings: &BorderSettings,
    library: &L,
) -> BorderConfig<L::Image> {
    let defaults: BorderConfig<L::Image> = BorderConfig::default();

    let image_border = settings
        .image_border
        .as_ref()
        .map_or_else(ImageBorder::default, |images| ImageBorder {
            corners: images.corners.map(|raw| resolve_slot(raw, library)),
            sides: images.sides.map(|raw| resolve_slot(raw, library)),
            sizing_strategy: images.sizing_strategy.unwrap_or_default(),
            side_mode: images.side_mode.unwrap_or_default(),
        });

    let inside_out_colors = settings
        .inside_out_colors
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|c| color_or(Some(c), palette::INK))
        .collect();

    BorderConfig {
        enabled: settings.enabled.unwrap_or(defaults.enabled),
        width: non_negative(settings.width, defaults.width),
        radius: non_negative(settings.radius, defaults.radius),
        color_mode: settings.color_mode.unwrap_or(defaults.color_mode),
        color: color_or(settings.color.as_deref(), palette::INK),
        inside_out_colors,
        image_border,
        background_mode: settings.background_mode.unwrap_or(defaults.background_mode),
        background_color: color_or(settings.background_color.as_deref(), palette::WHITE),
        padding: settings
            .padding
            .map_or(defaults.padding, |p| p.resolve(defaults.padding)),
    }
}

fn non_negative(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => default,
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
    use crate::render::recording::ImageRef;
    use crate::types::SlotStatus;
    use std::collections::HashMap;

    fn library() -> HashMap<String, ImageRef> {
        let mut lib = HashMap::new();
        lib.insert("vine".to_string(), ImageRef::new("vine", 40.0, 10.0));
        lib
    }

    #[test]
    fn test_empty_settings_give_defaults() {
        let config = build_render_config(&RenderSettings::default(), &library());
        assert_eq!(config, RenderConfig::default());
        assert!(config.border.enabled);
        assert_eq!(config.border.width, 4.0);
        assert_eq!(config.border.radius, 12.0);
        assert_eq!(config.canvas_padding, Padding::uniform(24.0));
        assert_eq!(config.content_width, 480.0);
        assert!(config.wrap_enabled);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let settings = RenderSettings {
            border: Some(BorderSettings {
                width: Some(-3.0),
                radius: Some(f64::NAN),
                padding: Some(PaddingSettings {
                    top: Some(5.0),
                    left: Some(-1.0),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            content_width: Some(f64::INFINITY),
            ..Default::default()
        };
        let config = build_render_config(&settings, &library());
        assert_eq!(config.border.width, 4.0);
        assert_eq!(config.border.radius, 12.0);
        assert_eq!(config.border.padding, Padding::new(5.0, 16.0, 16.0, 16.0));
        assert_eq!(config.content_width, 480.0);
    }

    #[test]
    fn test_bad_colors_fall_back() {
        let settings = RenderSettings {
            border: Some(BorderSettings {
                color: Some("not-a-color".to_string()),
                background_color: Some("#abc".to_string()),
                inside_out_colors: Some(vec!["#ff0000".to_string(), "bogus".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let config = build_render_config(&settings, &library());
        assert_eq!(config.border.color, "#111827");
        assert_eq!(config.border.background_color, "#AABBCC");
        assert_eq!(config.border.inside_out_colors, vec!["#FF0000", "#111827"]);
    }

    #[test]
    fn test_slots_resolved_against_library() {
        let json = r#"{
            "border": {
                "colorMode": "images",
                "imageBorder": {
                    "corners": { "topLeft": { "imageId": "vine", "rotation": 90 } },
                    "sides": { "top": { "imageId": "gone" } },
                    "sideMode": "repeat"
                }
            },
            "wrapEnabled": false
        }"#;
        let settings = RenderSettings::from_json(json).unwrap();
        let config = build_render_config(&settings, &library());
        let images = &config.border.image_border;
        assert_eq!(config.border.color_mode, ColorMode::Images);
        assert_eq!(images.corners.top_left.status, SlotStatus::Ready);
        assert_eq!(images.corners.top_left.rotation, 90);
        assert_eq!(images.sides.top.status, SlotStatus::Broken);
        assert_eq!(images.sides.left.status, SlotStatus::Empty);
        assert_eq!(images.side_mode, SideMode::Repeat);
        assert!(!config.wrap_enabled);
    }

    #[test]
    fn test_malformed_settings_report_settings_error() {
        let err = RenderSettings::from_json(r#"{"border": {"width": "wide"}}"#).unwrap_err();
        assert!(matches!(err, TextframeError::Settings(_)));
    }

    #[test]
    fn test_canvas_background_transparent() {
        let settings =
            RenderSettings::from_json(r#"{"canvasBackground": {"mode": "transparent"}}"#).unwrap();
        let config = build_render_config(&settings, &library());
        assert_eq!(config.background.mode, BackgroundMode::Transparent);
        assert_eq!(config.background.color, "#FFFFFF");
    }
}
