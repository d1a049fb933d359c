//! TOML configuration.
//!
//! Every section is optional; a missing section or key falls back to the
//! defaults below. [`load_config`] parses and validates a file, and
//! [`Config::default`] is used when the CLI runs without `--config`.
//!
//! ```toml
//! [corpus]
//! dir = "knowledge_base"
//! include_globs = ["*.json"]
//! follow_symlinks = true
//!
//! [chunking]
//! max_words = 1200
//! overlap_words = 160
//!
//! [retrieval]
//! k = 5
//! min_chars = 250
//!
//! [context]
//! max_chars = 6000
//!
//! [server]
//! bind = "127.0.0.1:8000"
//! ```

use anyhow::{Context, Result};
use kb_retriever_core::chunk::{ChunkingParams, DEFAULT_MAX_WORDS, DEFAULT_OVERLAP_WORDS};
use kb_retriever_core::search::{SearchParams, DEFAULT_K, DEFAULT_MIN_CHARS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::connector_fs::build_globset;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    #[serde(default = "default_corpus_dir")]
    pub dir: PathBuf,
    /// File-name globs (matched case-insensitively) selecting documents.
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    /// Treat symlinks in the corpus directory as the files they point to.
    #[serde(default = "default_follow_symlinks")]
    pub follow_symlinks: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            dir: default_corpus_dir(),
            include_globs: default_include_globs(),
            follow_symlinks: default_follow_symlinks(),
        }
    }
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from("knowledge_base")
}
fn default_include_globs() -> Vec<String> {
    vec!["*.json".to_string()]
}
fn default_follow_symlinks() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    #[serde(default = "default_overlap_words")]
    pub overlap_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            overlap_words: DEFAULT_OVERLAP_WORDS,
        }
    }
}

fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}
fn default_overlap_words() -> usize {
    DEFAULT_OVERLAP_WORDS
}

impl ChunkingConfig {
    pub fn params(&self) -> Result<ChunkingParams> {
        ChunkingParams::new(self.max_words, self.overlap_words)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            min_chars: DEFAULT_MIN_CHARS,
        }
    }
}

fn default_k() -> usize {
    DEFAULT_K
}
fn default_min_chars() -> usize {
    DEFAULT_MIN_CHARS
}

impl RetrievalConfig {
    pub fn params(&self) -> SearchParams {
        SearchParams {
            k: self.k,
            min_chars: self.min_chars,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContextConfig {
    /// Character budget for the rendered prompt context.
    #[serde(default = "default_context_chars")]
    pub max_chars: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_chars: default_context_chars(),
        }
    }
}

fn default_context_chars() -> usize {
    6000
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

impl Config {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.chunking.params()?;

        if self.context.max_chars == 0 {
            anyhow::bail!("context.max_chars must be > 0");
        }

        if self.corpus.include_globs.is_empty() {
            anyhow::bail!("corpus.include_globs must not be empty");
        }
        build_globset(&self.corpus.include_globs)
            .with_context(|| "Invalid pattern in corpus.include_globs")?;

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}
