//! Overlapping word-window chunker.
//!
//! Splits normalized document text into [`Chunk`]s of at most `max_words`
//! whitespace-delimited words, where each chunk shares `overlap_words`
//! words with the one before it.
//!
//! # Algorithm
//!
//! 1. Split the text into words on whitespace.
//! 2. Emit the window `words[start..start + max_words]`, clamped to the end.
//! 3. If the window reached the final word, stop.
//! 4. Otherwise advance `start` by `max_words - overlap_words` and repeat.
//!
//! The last window always ends exactly at the final word, so it may be
//! shorter than `max_words`. Empty text produces no chunks.
//!
//! `overlap_words >= max_words` would never advance the window, so
//! [`ChunkingParams::new`] rejects it before any text is chunked.
//!
//! # Example
//!
//! ```rust
//! use kb_retriever_core::chunk::{chunk_document, ChunkingParams};
//!
//! let params = ChunkingParams::new(4, 1).unwrap();
//! let chunks = chunk_document("doc.json", "a b c d e f g", &params);
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].text, "a b c d");
//! assert_eq!(chunks[1].text, "d e f g");
//! assert_eq!(chunks[1].chunk_id, 1);
//! ```

use anyhow::{bail, Result};

use crate::models::Chunk;
use crate::tokenize::tokenize;

/// Default window size in words used by the corpus loader.
pub const DEFAULT_MAX_WORDS: usize = 1200;

/// Default number of words shared between consecutive windows.
pub const DEFAULT_OVERLAP_WORDS: usize = 160;

/// Validated window parameters.
///
/// Construct with [`ChunkingParams::new`]; the fields are private so an
/// invalid combination can never reach [`split_words`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingParams {
    max_words: usize,
    overlap_words: usize,
}

impl ChunkingParams {
    /// Validate and build chunking parameters.
    ///
    /// Fails when `max_words == 0` or `overlap_words >= max_words`.
    pub fn new(max_words: usize, overlap_words: usize) -> Result<Self> {
        if max_words == 0 {
            bail!("chunking.max_words must be > 0");
        }
        if overlap_words >= max_words {
            bail!(
                "chunking.overlap_words ({}) must be smaller than chunking.max_words ({})",
                overlap_words,
                max_words
            );
        }
        Ok(Self {
            max_words,
            overlap_words,
        })
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn overlap_words(&self) -> usize {
        self.overlap_words
    }

    /// Number of words the window advances between chunks.
    pub fn stride(&self) -> usize {
        self.max_words - self.overlap_words
    }
}

impl Default for ChunkingParams {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            overlap_words: DEFAULT_OVERLAP_WORDS,
        }
    }
}

/// Split `text` into overlapping word windows.
///
/// # Guarantees
///
/// - Empty (or all-whitespace) text yields no windows.
/// - Text of at most `max_words` words yields exactly one window.
/// - Consecutive windows share exactly `overlap_words` words.
/// - The last window ends at the last word.
pub fn split_words(text: &str, params: &ChunkingParams) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut windows = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + params.max_words).min(words.len());
        windows.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start += params.stride();
    }

    windows
}

/// Chunk one document's normalized text, tagging each window with
/// `source` and a contiguous `chunk_id` starting at 0.
///
/// Each chunk's tokens are computed here, once.
pub fn chunk_document(source: &str, text: &str, params: &ChunkingParams) -> Vec<Chunk> {
    split_words(text, params)
        .into_iter()
        .enumerate()
        .map(|(chunk_id, text)| Chunk {
            source: source.to_string(),
            chunk_id,
            tokens: tokenize(&text),
            text,
        })
        .collect()
}
