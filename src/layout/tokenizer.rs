//! Whitespace tokenizer used for wrap decisions.

/// Split `text` into maximal whitespace-only and non-whitespace substrings.
///
/// The pieces concatenate back to `text`; runs of spaces stay together.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current_ws: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let ws = ch.is_whitespace();
        match current_ws {
            Some(prev) if prev != ws => {
                if let Some(piece) = text.get(start..idx) {
                    tokens.push(piece);
                }
                start = idx;
            }
            _ => {}
        }
        current_ws = Some(ws);
    }

    if let Some(piece) = text.get(start..) {
        if !piece.is_empty() {
            tokens.push(piece);
        }
    }

    tokens
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
    fn test_words_and_spaces() {
        assert_eq!(tokenize("hello  world"), vec!["hello", "  ", "world"]);
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        assert_eq!(tokenize("  a b "), vec!["  ", "a", " ", "b", " "]);
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_multibyte_and_tabs() {
        let tokens = tokenize("héllo\twörld");
        assert_eq!(tokens, vec!["héllo", "\t", "wörld"]);
        assert_eq!(tokens.concat(), "héllo\twörld");
    }
}
