//! Lowercase alphanumeric tokenizer used for relevance scoring.
//!
//! Tokens are maximal runs of ASCII letters and digits taken from a
//! lowercased copy of the input. Everything else (punctuation, symbols,
//! non-ASCII letters) acts as a separator.

use regex::Regex;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9]+").expect("token pattern is valid"));

/// Extract scoring tokens from `text`, in order of appearance.
///
/// ```rust
/// use kb_retriever_core::tokenize::tokenize;
///
/// assert_eq!(tokenize("GST-Rate: 5%"), vec!["gst", "rate", "5"]);
/// assert!(tokenize("!!!").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases() {
        assert_eq!(tokenize("Income TAX"), vec!["income", "tax"]);
    }

    #[test]
    fn test_digits_are_tokens() {
        assert_eq!(tokenize("Section 80C, FY 2024-25"), vec!["section", "80c", "fy", "2024", "25"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_symbols_only() {
        assert!(tokenize("!!! ??? ---").is_empty());
    }

    #[test]
    fn test_non_ascii_letters_split() {
        assert_eq!(tokenize("café naïve"), vec!["caf", "na", "ve"]);
    }

    #[test]
    fn test_keeps_duplicates_in_order() {
        assert_eq!(tokenize("rate, rate; RATE"), vec!["rate", "rate", "rate"]);
    }
}
