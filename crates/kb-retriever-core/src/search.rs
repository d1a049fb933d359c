//! Top-k ranking over an in-memory [`Corpus`].
//!
//! The ranking algorithm has no I/O or caching of its own. The caller owns
//! the corpus and passes it in together with [`SearchParams`].
//!
//! # Algorithm
//!
//! 1. Tokenize the query. No tokens → empty ranking.
//! 2. Score every chunk with [`relevance`] and keep scores `> 0`.
//! 3. Stable-sort by score descending, so equal scores keep corpus order.
//! 4. Truncate to `max(k, 1)`.
//! 5. Keep only chunks whose text has at least `min_chars` characters.
//! 6. If that removed everything, fall back to the unfiltered top-k and
//!    mark the ranking as degraded.

use serde::Serialize;

use crate::corpus::Corpus;
use crate::models::{Chunk, RetrievedChunk};
use crate::score::relevance;
use crate::tokenize::tokenize;

/// Default number of chunks returned per query.
pub const DEFAULT_K: usize = 5;

/// Default minimum chunk length (in characters) preferred in results.
pub const DEFAULT_MIN_CHARS: usize = 250;

/// Ranking parameters for a single query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum results to return; values below 1 are treated as 1.
    pub k: usize,
    /// Minimum chunk text length (in characters) to prefer.
    pub min_chars: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

/// A chunk paired with its relevance score for one query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub score: f64,
}

/// Ordered hits for one query.
#[derive(Debug, Clone, Default)]
pub struct Ranking<'a> {
    pub hits: Vec<ScoredChunk<'a>>,
    /// True when every top-k chunk was shorter than `min_chars` and the
    /// unfiltered top-k was returned instead.
    pub degraded: bool,
}

/// Owned, serializable form of a [`Ranking`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Retrieval {
    pub chunks: Vec<RetrievedChunk>,
    pub scores: Vec<f64>,
    pub degraded: bool,
}

impl Ranking<'_> {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn to_retrieval(&self) -> Retrieval {
        Retrieval {
            chunks: self.hits.iter().map(|h| RetrievedChunk::from(h.chunk)).collect(),
            scores: self.hits.iter().map(|h| h.score).collect(),
            degraded: self.degraded,
        }
    }
}

/// Rank `corpus` against `query`.
pub fn rank<'a>(corpus: &'a Corpus, query: &str, params: &SearchParams) -> Ranking<'a> {
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() {
        return Ranking::default();
    }

    let mut scored: Vec<ScoredChunk<'a>> = corpus
        .chunks()
        .iter()
        .filter_map(|chunk| {
            let score = relevance(&query_tokens, &chunk.tokens);
            (score > 0.0).then_some(ScoredChunk { chunk, score })
        })
        .collect();

    // `sort_by` is stable: ties keep corpus order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(params.k.max(1));

    let long_enough: Vec<ScoredChunk<'a>> = scored
        .iter()
        .filter(|h| h.chunk.text.chars().count() >= params.min_chars)
        .copied()
        .collect();

    if long_enough.is_empty() {
        let degraded = !scored.is_empty();
        Ranking {
            hits: scored,
            degraded,
        }
    } else {
        Ranking {
            hits: long_enough,
            degraded: false,
        }
    }
}
