//! Canonical plain-text normalization.
//!
//! Every run of whitespace (including newlines, tabs, and non-breaking
//! spaces) collapses to a single ASCII space, and the result is trimmed.
//! The ASCII information separators `U+001C..=U+001F` count as whitespace
//! too, so text that came out of PDF extraction with record separators
//! splits into words the same way as ordinary prose.
//!
//! ```rust
//! use kb_retriever_core::normalize::normalize_text;
//!
//! assert_eq!(normalize_text("  GST\u{a0}rate\n\tfive  "), "GST rate five");
//! ```

/// Collapse whitespace runs to single spaces and trim both ends.
///
/// Total and idempotent: `normalize_text(&normalize_text(s)) == normalize_text(s)`.
pub fn normalize_text(text: &str) -> String {
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(normalize_text("a   b\n\nc\t\td"), "a b c d");
    }

    #[test]
    fn test_non_breaking_space_replaced() {
        let out = normalize_text("five\u{a0}percent");
        assert_eq!(out, "five percent");
        assert!(!out.contains('\u{a0}'));
    }

    #[test]
    fn test_trims_ends() {
        assert_eq!(normalize_text("\n  hello world \r\n"), "hello world");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n\t\u{a0} "), "");
    }

    #[test]
    fn test_information_separators() {
        assert_eq!(normalize_text("a\u{1e}b\u{1f}c"), "a b c");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "  lead and trail  ",
            "tabs\tand\nnewlines\r\nmixed",
            "nbsp\u{a0}\u{a0}run",
            "unicode \u{2003} em space \u{3000} ideographic",
            "ünïcödé wörds ✓",
        ];
        for s in samples {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once, "not idempotent for {:?}", s);
            assert!(!once.contains("  "));
            assert!(!once.contains('\n'));
            assert!(!once.contains('\t'));
            assert!(!once.contains('\u{a0}'));
        }
    }

    #[test]
    fn test_preserves_punctuation() {
        assert_eq!(normalize_text("Sec. 80C: ₹1,50,000"), "Sec. 80C: ₹1,50,000");
    }
}
