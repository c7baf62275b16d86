//! Color parsing utilities.
//!
//! Colors travel as CSS color strings, which Canvas 2D consumes directly.
//! Settings coming from the UI are normalized here so a typo falls back to a
//! default instead of silently painting black.

/// A CSS color string (e.g., "#FF0000", "rgba(255, 0, 0, 0.5)")
pub type CssColor = String;

/// Parse a color string and normalize it to CSS format.
///
/// Supports formats:
/// - "#RGB" (shorthand hex)
/// - "#RRGGBB" (hex without alpha)
/// - "#RRGGBBAA" (CSS hex with trailing alpha)
/// - "RRGGBB" (hex without # prefix)
/// - "rgb(r, g, b)" and "rgba(r, g, b, a)"
/// - "transparent"
pub fn parse_color(s: &str) -> Option<CssColor> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("transparent") {
        return Some("rgba(0, 0, 0, 0)".to_string());
    }
    let (r, g, b, a) = parse_color_rgba(s)?;
    if a >= 1.0 {
        Some(format!("#{:02X}{:02X}{:02X}", r, g, b))
    } else {
        Some(format!("rgba({}, {}, {}, {})", r, g, b, trim_alpha(a)))
    }
}

/// Parse color and return RGBA components (0-255 for RGB, 0.0-1.0 for alpha)
pub fn parse_color_rgba(s: &str) -> Option<(u8, u8, u8, f64)> {
    let s = s.trim();

    if s.starts_with('#') {
        parse_hex_rgba(s)
    } else if s.starts_with("rgba(") {
        parse_rgba_string(s)
    } else if s.starts_with("rgb(") {
        parse_rgb_string(s)
    } else {
        // Try as plain hex
        parse_hex_rgba(&format!("#{}", s))
    }
}

fn parse_hex_rgba(s: &str) -> Option<(u8, u8, u8, f64)> {
    let hex = s.strip_prefix('#')?;

    match hex.len() {
        3 => {
            let digit = |i: usize| -> Option<u8> {
                let v = u8::from_str_radix(hex.get(i..=i)?, 16).ok()?;
                Some(v * 17)
            };
            Some((digit(0)?, digit(1)?, digit(2)?, 1.0))
        }
        6 => {
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            Some((r, g, b, 1.0))
        }
        8 => {
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            let a = u8::from_str_radix(hex.get(6..8)?, 16).ok()?;
            Some((r, g, b, f64::from(a) / 255.0))
        }
        _ => None,
    }
}

fn parse_rgb_string(s: &str) -> Option<(u8, u8, u8, f64)> {
    let inner = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim());
    let r: u8 = parts.next()?.parse().ok()?;
    let g: u8 = parts.next()?.parse().ok()?;
    let b: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((r, g, b, 1.0))
}

fn parse_rgba_string(s: &str) -> Option<(u8, u8, u8, f64)> {
    let inner = s.strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim());
    let r: u8 = parts.next()?.parse().ok()?;
    let g: u8 = parts.next()?.parse().ok()?;
    let b: u8 = parts.next()?.parse().ok()?;
    let a: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(0.0..=1.0).contains(&a) {
        return None;
    }
    Some((r, g, b, a))
}

fn trim_alpha(a: f64) -> String {
    let s = format!("{:.3}", a);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Normalize `value`, or fall back to `default` when it does not parse.
pub fn color_or(value: Option<&str>, default: &str) -> CssColor {
    value
        .and_then(parse_color)
        .unwrap_or_else(|| default.to_string())
}

/// Default colors.
pub mod palette {
    pub const WHITE: &str = "#FFFFFF";

    /// Text and border ink.
    pub const INK: &str = "#111827";
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
    fn test_parse_hex_6() {
        assert_eq!(parse_color("#ff0000").unwrap(), "#FF0000");
    }

    #[test]
    fn test_parse_hex_3() {
        assert_eq!(parse_color("#0f8").unwrap(), "#00FF88");
    }

    #[test]
    fn test_parse_hex_8_css_order() {
        assert_eq!(parse_color("#FF000080").unwrap(), "rgba(255, 0, 0, 0.502)");
        assert_eq!(parse_color("#FF0000FF").unwrap(), "#FF0000");
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_color("rgb(255, 128, 64)").unwrap(), "#FF8040");
    }

    #[test]
    fn test_parse_rgba() {
        assert_eq!(
            parse_color("rgba(255, 128, 64, 0.5)").unwrap(),
            "rgba(255, 128, 64, 0.5)"
        );
        assert!(parse_color("rgba(1, 2, 3, 4)").is_none());
    }

    #[test]
    fn test_parse_without_hash() {
        assert_eq!(parse_color("FF0000").unwrap(), "#FF0000");
    }

    #[test]
    fn test_transparent() {
        assert_eq!(parse_color("transparent").unwrap(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn test_color_or_falls_back() {
        assert_eq!(color_or(Some("not-a-color"), palette::INK), "#111827");
        assert_eq!(color_or(None, palette::WHITE), "#FFFFFF");
        assert_eq!(color_or(Some("#abc"), palette::WHITE), "#AABBCC");
    }
}
