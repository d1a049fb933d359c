//! The retrieval query interface.
//!
//! A [`Retriever`] owns its corpus. The corpus is built on first use (or on
//! an explicit [`Retriever::load`]) and shared read-only afterwards. The
//! build happens under a mutex, so concurrent first queries load the
//! directory exactly once; queries then score against an `Arc<Corpus>`
//! without holding the lock.
//!
//! [`Retriever::invalidate`] drops the cached corpus and the next query
//! rebuilds it wholesale from disk.

use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard};

use kb_retriever_core::chunk::ChunkingParams;
use kb_retriever_core::corpus::Corpus;
use kb_retriever_core::models::RetrievedChunk;
use kb_retriever_core::search::{rank, Retrieval, SearchParams};

use crate::config::{Config, CorpusConfig};
use crate::ingest::load_corpus;

pub struct Retriever {
    corpus_config: CorpusConfig,
    chunking: ChunkingParams,
    defaults: SearchParams,
    corpus: Mutex<Option<Arc<Corpus>>>,
}

impl Retriever {
    /// Build a retriever from validated configuration. Does not touch the
    /// filesystem; the corpus is loaded lazily.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_params(
            config.corpus.clone(),
            config.chunking.params()?,
            config.retrieval.params(),
        ))
    }

    pub fn with_params(
        corpus_config: CorpusConfig,
        chunking: ChunkingParams,
        defaults: SearchParams,
    ) -> Self {
        Self {
            corpus_config,
            chunking,
            defaults,
            corpus: Mutex::new(None),
        }
    }

    /// Default `k` / `min_chars` from configuration.
    pub fn defaults(&self) -> SearchParams {
        self.defaults
    }

    /// Return the cached corpus, building it first if needed.
    pub fn load(&self) -> Result<Arc<Corpus>> {
        let mut slot = self.lock();
        if let Some(corpus) = slot.as_ref() {
            return Ok(Arc::clone(corpus));
        }
        let corpus = Arc::new(load_corpus(&self.corpus_config, &self.chunking)?);
        *slot = Some(Arc::clone(&corpus));
        Ok(corpus)
    }

    /// Whether a corpus is currently cached.
    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Drop the cached corpus. The next query reloads it from disk.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Retrieve up to `k` chunks for `query`, preferring chunks of at
    /// least `min_chars` characters.
    ///
    /// A query without alphanumeric content returns an empty list.
    pub fn retrieve(&self, query: &str, k: usize, min_chars: usize) -> Result<Vec<RetrievedChunk>> {
        Ok(self.retrieve_detailed(query, k, min_chars)?.chunks)
    }

    /// Like [`Retriever::retrieve`], also reporting scores and whether the
    /// min-length filter had to be bypassed.
    pub fn retrieve_detailed(&self, query: &str, k: usize, min_chars: usize) -> Result<Retrieval> {
        let corpus = self.load()?;
        let ranking = rank(&corpus, query, &SearchParams { k, min_chars });
        Ok(ranking.to_retrieval())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<Corpus>>> {
        // The slot only ever holds a fully built corpus, so a poisoned lock
        // still guards consistent data.
        self.corpus.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn retriever_for(dir: &Path) -> Retriever {
        let mut config = Config::default();
        config.corpus.dir = dir.to_path_buf();
        Retriever::new(&config).unwrap()
    }

    #[test]
    fn test_lazy_load() {
        let tmp = TempDir::new().unwrap();
        let r = retriever_for(tmp.path());
        assert!(!r.is_loaded());
        r.retrieve("anything", 5, 250).unwrap();
        assert!(r.is_loaded());
    }

    #[test]
    fn test_load_returns_same_corpus() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.json"), r#"{"text": "gst"}"#).unwrap();
        let r = retriever_for(tmp.path());
        let first = r.load().unwrap();
        let second = r.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_survives_new_files_until_invalidated() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.json"), r#"{"text": "gst rate"}"#).unwrap();
        let r = retriever_for(tmp.path());
        assert_eq!(r.retrieve("tds", 5, 0).unwrap().len(), 0);

        fs::write(tmp.path().join("b.json"), r#"{"text": "tds rules"}"#).unwrap();
        assert_eq!(r.retrieve("tds", 5, 0).unwrap().len(), 0);

        r.invalidate();
        let hits = r.retrieve("tds", 5, 0).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source, "b.json");
    }

    #[test]
    fn test_detailed_reports_degraded() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.json"), r#"{"text": "gst rate"}"#).unwrap();
        let r = retriever_for(tmp.path());
        let out = r.retrieve_detailed("gst", 5, 250).unwrap();
        assert_eq!(out.chunks.len(), 1);
        assert!(out.degraded);
        assert!(out.scores[0] > 0.0);
    }

    #[test]
    fn test_concurrent_first_access_builds_once() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.json"), r#"{"text": "gst"}"#).unwrap();
        let r = Arc::new(retriever_for(tmp.path()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let r = Arc::clone(&r);
                std::thread::spawn(move || r.load().unwrap())
            })
            .collect();
        let corpora: Vec<Arc<Corpus>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for c in &corpora[1..] {
            assert!(Arc::ptr_eq(&corpora[0], c));
        }
    }
}
