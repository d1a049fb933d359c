//! Corpus loading.
//!
//! Coordinates the full load: discovery → decode → payload classification
//! → normalization → chunking. One bad document never aborts the load; it
//! is logged and skipped. Only a failure to read the corpus directory
//! itself is returned as an error.

use anyhow::Result;
use tracing::{debug, info, warn};

use kb_retriever_core::chunk::{chunk_document, ChunkingParams};
use kb_retriever_core::corpus::Corpus;
use kb_retriever_core::models::Chunk;

use crate::config::CorpusConfig;
use crate::connector_fs::{discover_documents, DocumentFile};
use crate::extract::{classify, decode_document, default_strategies, ParseStrategy};

/// Build a fresh [`Corpus`] from every document in the corpus directory.
pub fn load_corpus(config: &CorpusConfig, params: &ChunkingParams) -> Result<Corpus> {
    let files = discover_documents(&config.dir, &config.include_globs, config.follow_symlinks)?;
    let strategies = default_strategies();

    let mut chunks = Vec::new();
    let mut loaded = 0usize;
    let mut skipped = 0usize;

    for file in &files {
        match load_document(file, &strategies, params) {
            Some(doc_chunks) => {
                loaded += 1;
                chunks.extend(doc_chunks);
            }
            None => skipped += 1,
        }
    }

    info!(
        dir = %config.dir.display(),
        documents = loaded,
        skipped,
        chunks = chunks.len(),
        "corpus loaded"
    );

    Ok(Corpus::from_chunks(chunks))
}

/// Load and chunk one document, or `None` if it had to be skipped.
fn load_document(
    file: &DocumentFile,
    strategies: &[Box<dyn ParseStrategy>],
    params: &ChunkingParams,
) -> Option<Vec<Chunk>> {
    let bytes = match std::fs::read(&file.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(file = %file.name, error = %e, "skipping unreadable file");
            return None;
        }
    };

    let raw = match decode_document(bytes) {
        Ok(raw) => raw,
        Err(_) => {
            warn!(file = %file.name, "skipping non-UTF-8 file");
            return None;
        }
    };

    let payload = match classify(&raw, strategies) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(file = %file.name, error = %e, "skipping unparseable file");
            return None;
        }
    };
    let kind = payload.kind();

    let text = match payload.into_text() {
        Ok(text) => text,
        Err(e) => {
            warn!(file = %file.name, error = %e, "skipping file with unrenderable payload");
            return None;
        }
    };

    let chunks = chunk_document(&file.name, &text, params);
    debug!(file = %file.name, payload = kind, chunks = chunks.len(), "document chunked");
    Some(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn load_corpus_dir(dir: &Path, params: &ChunkingParams) -> Result<Corpus> {
        let config = CorpusConfig {
            dir: dir.to_path_buf(),
            ..CorpusConfig::default()
        };
        load_corpus(&config, params)
    }

    fn load(dir: &Path) -> Corpus {
        load_corpus_dir(dir, &ChunkingParams::default()).unwrap()
    }

    #[test]
    fn test_missing_directory_yields_empty_corpus() {
        let tmp = TempDir::new().unwrap();
        assert!(load(&tmp.path().join("absent")).is_empty());
    }

    #[test]
    fn test_mixed_shapes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.json"), r#"{"text": "GST rate is five percent"}"#).unwrap();
        fs::write(tmp.path().join("b.json"), r#"[{"slab": "0-3L", "rate": "nil"}]"#).unwrap();
        fs::write(tmp.path().join("c.json"), "plain text, not json").unwrap();

        let corpus = load(tmp.path());
        let chunks = corpus.chunks();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].source, "a.json");
        assert_eq!(chunks[0].text, "GST rate is five percent");
        assert_eq!(chunks[1].text, r#"[{"slab": "0-3L", "rate": "nil"}]"#);
        assert_eq!(chunks[2].text, "plain text, not json");
    }

    #[test]
    fn test_non_utf8_skipped_load_continues() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.json"), [0xffu8, 0xfe, 0xfd]).unwrap();
        fs::write(tmp.path().join("good.json"), r#"{"text": "income tax"}"#).unwrap();

        let corpus = load(tmp.path());
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.chunks()[0].source, "good.json");
    }

    #[test]
    fn test_empty_text_produces_no_chunks() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("empty.json"), r#"{"text": "   "}"#).unwrap();
        assert!(load(tmp.path()).is_empty());
    }

    #[test]
    fn test_chunk_ids_restart_per_document() {
        let tmp = TempDir::new().unwrap();
        let long = (0..30).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        fs::write(tmp.path().join("a.json"), format!(r#"{{"text": "{}"}}"#, long)).unwrap();
        fs::write(tmp.path().join("b.json"), format!(r#"{{"text": "{}"}}"#, long)).unwrap();

        let params = ChunkingParams::new(10, 2).unwrap();
        let corpus = load_corpus_dir(tmp.path(), &params).unwrap();
        let ids: Vec<(String, usize)> = corpus
            .chunks()
            .iter()
            .map(|c| (c.source.clone(), c.chunk_id))
            .collect();
        // 30 words, window 10, stride 8: starts at 0, 8, 16, 24.
        assert_eq!(
            ids,
            vec![
                ("a.json".to_string(), 0),
                ("a.json".to_string(), 1),
                ("a.json".to_string(), 2),
                ("a.json".to_string(), 3),
                ("b.json".to_string(), 0),
                ("b.json".to_string(), 1),
                ("b.json".to_string(), 2),
                ("b.json".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_include_globs_respected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.json"), r#"{"text": "json doc"}"#).unwrap();
        fs::write(tmp.path().join("b.txt"), "text doc").unwrap();

        let config = CorpusConfig {
            dir: tmp.path().to_path_buf(),
            include_globs: vec!["*.txt".to_string()],
            ..CorpusConfig::default()
        };
        let corpus = load_corpus(&config, &ChunkingParams::default()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.chunks()[0].text, "text doc");
    }
}
