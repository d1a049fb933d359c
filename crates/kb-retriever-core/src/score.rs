//! Term-overlap relevance scoring.
//!
//! The score of a chunk is the number of times the query's tokens occur in
//! it (each query token counted once per occurrence in the query, so a
//! repeated query word weighs proportionally more), dampened by chunk
//! length:
//!
//! ```text
//! score = Σ_{q in query} tf(q, chunk) / (1 + |chunk| / 5000)
//! ```
//!
//! This is not TF-IDF. There is no inverse-document-frequency term and no
//! corpus-wide statistic: a word that appears in every chunk counts the
//! same as a rare one.

use std::collections::HashMap;

/// Chunk length (in tokens) at which the dampening divisor reaches 2.
pub const LENGTH_NORM_TOKENS: f64 = 5000.0;

/// Score `chunk_tokens` against `query_tokens`.
///
/// Returns 0.0 for an empty chunk or when no query token occurs in it.
/// The result is never negative.
pub fn relevance(query_tokens: &[String], chunk_tokens: &[String]) -> f64 {
    if chunk_tokens.is_empty() {
        return 0.0;
    }

    let mut term_freq: HashMap<&str, usize> = HashMap::new();
    for token in chunk_tokens {
        *term_freq.entry(token.as_str()).or_insert(0) += 1;
    }

    let hits: usize = query_tokens
        .iter()
        .map(|q| term_freq.get(q.as_str()).copied().unwrap_or(0))
        .sum();

    hits as f64 / (1.0 + chunk_tokens.len() as f64 / LENGTH_NORM_TOKENS)
}
