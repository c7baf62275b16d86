//! Style resolution: run attributes to concrete font and color values.
//!
//! Font and size keys are looked up in registries owned by the resolver, so
//! independent renderers never share mutable font tables.

use std::collections::HashMap;

use crate::types::StyleAttributes;

/// Text color when a run has none.
pub const DEFAULT_COLOR: &str = "#111827";
/// Font key used when a run has none or an unknown one.
pub const DEFAULT_FONT_KEY: &str = "sans-serif";
/// Size of the `normal` key, in CSS pixels.
pub const DEFAULT_FONT_SIZE: f64 = 18.0;

/// Font key to CSS family mapping.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    families: HashMap<String, String>,
    fallback: String,
}

impl FontRegistry {
    /// An empty registry; every key resolves to `fallback`.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            families: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Register (or replace) a family for `key`.
    pub fn register(&mut self, key: impl Into<String>, family: impl Into<String>) {
        self.families.insert(key.into(), family.into());
    }

    pub fn with(mut self, key: impl Into<String>, family: impl Into<String>) -> Self {
        self.register(key, family);
        self
    }

    pub fn family(&self, key: Option<&str>) -> &str {
        key.and_then(|k| self.families.get(k))
            .map_or(self.fallback.as_str(), String::as_str)
    }
}

impl Default for FontRegistry {
    /// The editor's stock fonts.
    fn default() -> Self {
        Self::new("sans-serif")
            .with(DEFAULT_FONT_KEY, "sans-serif")
            .with("serif", "Georgia, 'Times New Roman', serif")
            .with("monospace", "Menlo, Consolas, 'Courier New', monospace")
            .with("inter", "Inter, system-ui, sans-serif")
            .with("handwriting", "'Comic Sans MS', 'Comic Neue', cursive")
    }
}

/// Size key to pixel mapping. Numeric keys (`"20"`, `"20px"`) bypass the table.
#[derive(Debug, Clone)]
pub struct SizeRegistry {
    sizes: HashMap<String, f64>,
    fallback: f64,
}

impl SizeRegistry {
    pub fn new(fallback: f64) -> Self {
        Self {
            sizes: HashMap::new(),
            fallback,
        }
    }

    pub fn register(&mut self, key: impl Into<String>, px: f64) {
        self.sizes.insert(key.into(), px);
    }

    pub fn with(mut self, key: impl Into<String>, px: f64) -> Self {
        self.register(key, px);
        self
    }

    pub fn size(&self, key: Option<&str>) -> f64 {
        let Some(key) = key else {
            return self.fallback;
        };
        if let Some(px) = self.sizes.get(key) {
            return *px;
        }
        parse_px(key).unwrap_or(self.fallback)
    }
}

impl Default for SizeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_SIZE)
            .with("small", 14.0)
            .with("normal", DEFAULT_FONT_SIZE)
            .with("large", 24.0)
            .with("huge", 32.0)
    }
}

/// Parse `"20"` or `"20px"` into a positive finite pixel size.
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    let px: f64 = number.parse().ok()?;
    (px.is_finite() && px > 0.0).then_some(px)
}

/// Concrete style of a run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub color: String,
    pub background: Option<String>,
    pub font_family: String,
    pub font_size: f64,
}

impl ResolvedStyle {
    /// CSS font shorthand, e.g. `"italic bold 18px sans-serif"`.
    pub fn font_string(&self) -> String {
        build_font(self.italic, self.bold, self.font_size, &self.font_family)
    }
}

/// Build a CSS font shorthand.
pub fn build_font(italic: bool, bold: bool, size: f64, family: &str) -> String {
    let font_style = if italic { "italic " } else { "" };
    let font_weight = if bold { "bold " } else { "" };
    format!("{}{}{}px {}", font_style, font_weight, size, family)
}

/// Resolves [`StyleAttributes`] through the registries and defaults.
#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    pub fonts: FontRegistry,
    pub sizes: SizeRegistry,
}

impl StyleResolver {
    pub fn new(fonts: FontRegistry, sizes: SizeRegistry) -> Self {
        Self { fonts, sizes }
    }

    pub fn resolve(&self, attrs: &StyleAttributes) -> ResolvedStyle {
        ResolvedStyle {
            bold: attrs.bold.unwrap_or(false),
            italic: attrs.italic.unwrap_or(false),
            underline: attrs.underline.unwrap_or(false),
            color: attrs
                .color
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            background: attrs.background.clone().filter(|c| !c.trim().is_empty()),
            font_family: self.fonts.family(attrs.font.as_deref()).to_string(),
            font_size: self.sizes.size(attrs.size.as_deref()),
        }
    }

    /// Size of a run with no size attribute.
    pub fn default_size(&self) -> f64 {
        self.sizes.size(None)
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

    #[test]
    fn test_defaults() {
        let style = StyleResolver::default().resolve(&StyleAttributes::default());
        assert!(!style.bold && !style.italic && !style.underline);
        assert_eq!(style.color, DEFAULT_COLOR);
        assert_eq!(style.background, None);
        assert_eq!(style.font_family, "sans-serif");
        assert_eq!(style.font_size, 18.0);
        assert_eq!(style.font_string(), "18px sans-serif");
    }

    #[test]
    fn test_keys_resolve_through_registries() {
        let attrs = StyleAttributes {
            bold: Some(true),
            italic: Some(true),
            font: Some("serif".to_string()),
            size: Some("huge".to_string()),
            ..Default::default()
        };
        let style = StyleResolver::default().resolve(&attrs);
        assert_eq!(style.font_size, 32.0);
        assert_eq!(
            style.font_string(),
            "italic bold 32px Georgia, 'Times New Roman', serif"
        );
    }

    #[test]
    fn test_numeric_size_and_unknown_font() {
        let attrs = StyleAttributes {
            font: Some("papyrus".to_string()),
            size: Some("21px".to_string()),
            ..Default::default()
        };
        let style = StyleResolver::default().resolve(&attrs);
        assert_eq!(style.font_size, 21.0);
        assert_eq!(style.font_family, "sans-serif");
    }

    #[test]
    fn test_registries_are_independent() {
        let mut a = StyleResolver::default();
        let b = StyleResolver::default();
        a.fonts.register("serif", "Custom Serif");
        let attrs = StyleAttributes {
            font: Some("serif".to_string()),
            ..Default::default()
        };
        assert_eq!(a.resolve(&attrs).font_family, "Custom Serif");
        assert_ne!(b.resolve(&attrs).font_family, "Custom Serif");
    }

    #[test]
    fn test_parse_px_rejects_garbage() {
        assert_eq!(parse_px("12.5px"), Some(12.5));
        assert_eq!(parse_px("-3"), None);
        assert_eq!(parse_px("large"), None);
    }
}
