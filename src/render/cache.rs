//! Font metrics memoization.
//!
//! Background highlight bands need the ascent and descent of a font. For a
//! given measurer these depend only on the font string, which is the key; the
//! measurer is not part of it, so the owner clears the cache when it swaps
//! measurers. Entries are evicted in insertion order once the capacity is
//! reached.

use std::collections::{HashMap, VecDeque};

use crate::measure::{font_size_of, TextMeasurer};
use crate::style::DEFAULT_FONT_SIZE;

/// Glyphs sampled for a font's ascent (`M`) and descent (`g`).
const METRICS_SAMPLE: &str = "Mg";
const FONT_METRICS_CACHE_CAP: usize = 256;

/// Vertical extent of a font around its baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f64,
    pub descent: f64,
}

impl FontMetrics {
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Insertion-order cache of [`FontMetrics`] keyed by CSS font string.
#[derive(Debug)]
pub struct FontMetricsCache {
    entries: HashMap<String, FontMetrics>,
    order: VecDeque<String>,
    max_entries: usize,
}

impl Default for FontMetricsCache {
    fn default() -> Self {
        Self::new(FONT_METRICS_CACHE_CAP)
    }
}

impl FontMetricsCache {
    /// A capacity of 0 disables caching entirely.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_entries,
        }
    }

    pub fn get(&self, font: &str) -> Option<FontMetrics> {
        if self.max_entries == 0 {
            return None;
        }
        self.entries.get(font).copied()
    }

    /// Cached metrics for `font`, measuring on first use.
    pub fn get_or_measure<M: TextMeasurer + ?Sized>(
        &mut self,
        font: &str,
        measurer: &M,
    ) -> FontMetrics {
        if let Some(metrics) = self.get(font) {
            return metrics;
        }
        let size = font_size_of(font).unwrap_or(DEFAULT_FONT_SIZE);
        let measured = measurer.measure(METRICS_SAMPLE, font);
        let metrics = FontMetrics {
            ascent: measured.ascent_or_fallback(size),
            descent: measured.descent_or_fallback(size),
        };
        self.insert(font, metrics);
        metrics
    }

    fn insert(&mut self, font: &str, metrics: FontMetrics) {
        if self.max_entries == 0 || self.entries.contains_key(font) {
            return;
        }
        self.entries.insert(font.to_string(), metrics);
        self.order.push_back(font.to_string());
        self.enforce_cap();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Evict oldest entries until we're at or below capacity.
    fn enforce_cap(&mut self) {
        while self.entries.len() > self.max_entries {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            } else {
                break;
            }
        }
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
    use crate::measure::TextMetrics;
    use std::cell::Cell;

    #[test]
    fn test_measures_once_per_font() {
        let calls = Cell::new(0);
        let measurer = |_text: &str, _font: &str| {
            calls.set(calls.get() + 1);
            TextMetrics {
                width: 20.0,
                ascent: Some(13.0),
                descent: Some(4.0),
            }
        };
        let mut cache = FontMetricsCache::default();
        for _ in 0..50 {
            let m = cache.get_or_measure("18px sans-serif", &measurer);
            assert_eq!(m.height(), 17.0);
        }
        assert_eq!(calls.get(), 1);
        cache.get_or_measure("bold 18px sans-serif", &measurer);
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_fallback_ratios_from_font_size() {
        let measurer = |_text: &str, _font: &str| TextMetrics::width_only(1.0);
        let mut cache = FontMetricsCache::default();
        let m = cache.get_or_measure("30px serif", &measurer);
        assert!((m.ascent - 24.0).abs() < 1e-9);
        assert!((m.descent - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_enforces_cap() {
        let measurer = |_text: &str, _font: &str| TextMetrics::width_only(1.0);
        let mut cache = FontMetricsCache::new(2);
        cache.get_or_measure("10px a", &measurer);
        cache.get_or_measure("10px b", &measurer);
        cache.get_or_measure("10px c", &measurer);
        assert_eq!(cache.len(), 2);
        assert!(cache.get("10px a").is_none());
        assert!(cache.get("10px c").is_some());
    }

    #[test]
    fn test_zero_capacity_always_measures() {
        let calls = Cell::new(0);
        let measurer = |_text: &str, _font: &str| {
            calls.set(calls.get() + 1);
            TextMetrics::width_only(1.0)
        };
        let mut cache = FontMetricsCache::new(0);
        cache.get_or_measure("10px a", &measurer);
        cache.get_or_measure("10px a", &measurer);
        assert_eq!(calls.get(), 2);
        assert!(cache.is_empty());
    }
}
