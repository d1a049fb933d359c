//! The in-memory corpus: every chunk of every loaded document, in order.
//!
//! A [`Corpus`] is built wholesale and never updated in place. Chunks are
//! grouped by document, and `chunk_id` restarts at 0 for each document.

use std::collections::BTreeMap;

use crate::models::Chunk;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    chunks: Vec<Chunk>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from chunks already grouped by document.
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of distinct documents that contributed at least one chunk.
    pub fn document_count(&self) -> usize {
        self.chunks_per_source().len()
    }

    /// Chunk counts keyed by source, sorted by source name.
    pub fn chunks_per_source(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for chunk in &self.chunks {
            *counts.entry(chunk.source.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
