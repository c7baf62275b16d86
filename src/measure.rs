//! Text measurement capability.
//!
//! Layout and bounds measurement only ever see a [`TextMeasurer`]; the
//! Canvas 2D backend, the approximate native measurer and test fakes all
//! implement it.

use crate::style::{parse_px, DEFAULT_FONT_SIZE};

/// Ascent falls back to this fraction of the font size.
pub const FALLBACK_ASCENT_RATIO: f64 = 0.8;
/// Descent falls back to this fraction of the font size.
pub const FALLBACK_DESCENT_RATIO: f64 = 0.2;

/// Result of measuring a string.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Advance width in CSS pixels.
    pub width: f64,
    /// Distance from the alphabetic baseline to the top of the inked glyphs.
    pub ascent: Option<f64>,
    /// Distance from the alphabetic baseline to the bottom of the inked glyphs.
    pub descent: Option<f64>,
}

impl TextMetrics {
    pub const fn width_only(width: f64) -> Self {
        Self {
            width,
            ascent: None,
            descent: None,
        }
    }

    /// Ascent, or `0.8 × font_size` when the backend reports none.
    pub fn ascent_or_fallback(&self, font_size: f64) -> f64 {
        self.ascent
            .filter(|a| a.is_finite())
            .unwrap_or(font_size * FALLBACK_ASCENT_RATIO)
    }

    /// Descent, or `0.2 × font_size` when the backend reports none.
    pub fn descent_or_fallback(&self, font_size: f64) -> f64 {
        self.descent
            .filter(|d| d.is_finite())
            .unwrap_or(font_size * FALLBACK_DESCENT_RATIO)
    }
}

/// Measures `text` rendered in the CSS `font`.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &str) -> TextMetrics;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &str) -> TextMetrics,
{
    fn measure(&self, text: &str, font: &str) -> TextMetrics {
        self(text, font)
    }
}

/// Extract the pixel size from a CSS font shorthand such as `"bold 18px serif"`.
pub fn font_size_of(font: &str) -> Option<f64> {
    font.split_whitespace().find_map(|part| {
        if part.ends_with("px") {
            parse_px(part)
        } else {
            None
        }
    })
}

/// Font-size proportional measurer for hosts without a text engine.
///
/// Every character advances `advance_ratio × size` (bold adds 10%). Ascent
/// and descent are left to the fallback ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxMeasurer {
    pub advance_ratio: f64,
}

impl Default for ApproxMeasurer {
    fn default() -> Self {
        Self { advance_ratio: 0.55 }
    }
}

impl TextMeasurer for ApproxMeasurer {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font: &str) -> TextMetrics {
        let size = font_size_of(font).unwrap_or(DEFAULT_FONT_SIZE);
        let weight = if font.split_whitespace().any(|p| p == "bold") {
            1.1
        } else {
            1.0
        };
        let chars = text.chars().count() as f64;
        TextMetrics::width_only(chars * size * self.advance_ratio * weight)
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
    fn test_font_size_of() {
        assert_eq!(font_size_of("italic bold 24px Georgia, serif"), Some(24.0));
        assert_eq!(font_size_of("serif"), None);
    }

    #[test]
    fn test_fallback_metrics() {
        let m = TextMetrics::width_only(10.0);
        assert!((m.ascent_or_fallback(20.0) - 16.0).abs() < 1e-9);
        assert!((m.descent_or_fallback(20.0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_approx_measurer_scales_with_size() {
        let m = ApproxMeasurer { advance_ratio: 0.5 };
        assert_eq!(m.measure("abcd", "20px sans-serif").width, 40.0);
        assert_eq!(m.measure("abcd", "10px sans-serif").width, 20.0);
    }

    #[test]
    fn test_closure_measurer() {
        let m = |text: &str, _font: &str| TextMetrics::width_only(text.len() as f64);
        assert_eq!(m.measure("abc", "x").width, 3.0);
    }
}
