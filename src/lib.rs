//! # kb-retriever
//!
//! Retrieves passages from a private document collection to ground the
//! answers of a conversational assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//! │ knowledge_   │──▶│ extract +     │──▶│ Corpus       │
//! │ base/*.json  │   │ normalize +   │   │ (in memory,  │
//! └──────────────┘   │ chunk         │   │  cached)     │
//!                    └───────────────┘   └──────┬───────┘
//!                                               │ score + rank
//!                          ┌────────────────────┤
//!                          ▼                    ▼
//!                     ┌──────────┐        ┌──────────┐
//!                     │   CLI    │        │   HTTP   │
//!                     │  (kbr)   │        │ /retrieve│
//!                     └──────────┘        └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! kbr build-kb --input data_processed/cleaned --output knowledge_base
//! kbr stats
//! kbr search "GST rate on essential goods"
//! kbr serve
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`connector_fs`] | Document discovery in the corpus directory |
//! | [`extract`] | Payload classification and flattening |
//! | [`ingest`] | Corpus loading |
//! | [`retriever`] | Cached corpus and the query interface |
//! | [`context`] | Prompt context assembly |
//! | [`kb_build`] | Knowledge-base documents from page records |
//! | [`search`] | `kbr search` |
//! | [`stats`] | `kbr stats` |
//! | [`server`] | HTTP server |
//!
//! The pure algorithms (normalization, tokenization, chunking, scoring,
//! ranking) live in `kb-retriever-core`, re-exported here as
//! [`kb_retriever_core`].

pub mod config;
pub mod connector_fs;
pub mod context;
pub mod extract;
pub mod ingest;
pub mod kb_build;
pub mod retriever;
pub mod search;
pub mod server;
pub mod stats;

pub use kb_retriever_core;
pub use kb_retriever_core::models::{Chunk, RetrievedChunk};
pub use kb_retriever_core::search::Retrieval;
pub use retriever::Retriever;
