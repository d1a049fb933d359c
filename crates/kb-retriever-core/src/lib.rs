//! # kb-retriever core
//!
//! Pure retrieval logic for kb-retriever: text normalization, tokenization,
//! word-window chunking, the in-memory corpus, term-overlap scoring, and
//! top-k ranking.
//!
//! This crate contains no tokio, filesystem I/O, or HTTP dependencies.
//! Loading documents from disk and caching the corpus live in the
//! `kb-retriever` application crate.

pub mod chunk;
pub mod corpus;
pub mod models;
pub mod normalize;
pub mod score;
pub mod search;
pub mod tokenize;
