//! # kb-retriever CLI (`kbr`)
//!
//! ## Usage
//!
//! ```bash
//! kbr [--config ./config/kbr.toml] [--corpus ./knowledge_base] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kbr search "<query>"` | Retrieve ranked chunks for a query |
//! | `kbr stats` | Show what the corpus directory contains |
//! | `kbr build-kb` | Build knowledge-base JSON from page records |
//! | `kbr serve` | Start the HTTP retrieval server |
//!
//! Logs go to stderr and are controlled with `RUST_LOG`
//! (default `kb_retriever=info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kb_retriever::config::{self, Config};
use kb_retriever::{kb_build, search, server, stats};

/// kb-retriever — ground assistant answers in a private document collection.
#[derive(Parser)]
#[command(
    name = "kbr",
    about = "kb-retriever — retrieve grounding passages from a private knowledge base",
    version
)]
struct Cli {
    /// Path to a configuration file (TOML). Built-in defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override `[corpus].dir`.
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve the best-matching chunks for a query.
    Search {
        /// The query text.
        query: String,

        /// Maximum number of chunks (defaults to `[retrieval].k`).
        #[arg(long)]
        k: Option<usize>,

        /// Preferred minimum chunk length in characters (defaults to `[retrieval].min_chars`).
        #[arg(long)]
        min_chars: Option<usize>,

        /// Print the rendered prompt context instead of a ranked list.
        #[arg(long)]
        context: bool,
    },

    /// Load the corpus and print document and chunk counts.
    Stats,

    /// Build knowledge-base documents from `*.jsonl` page records.
    ///
    /// Pages are cleaned, grouped by domain (file stem before `__`), and
    /// written as `<output>/<domain>.json` with a `text` field.
    BuildKb {
        /// Directory of `*.jsonl` page-record files.
        #[arg(long)]
        input: PathBuf,

        /// Output directory (defaults to `[corpus].dir`).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Start the HTTP retrieval server on `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kb_retriever=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    if let Some(dir) = cli.corpus {
        cfg.corpus.dir = dir;
    }

    match cli.command {
        Commands::Search {
            query,
            k,
            min_chars,
            context,
        } => {
            search::run_search(&cfg, &query, k, min_chars, context)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
        Commands::BuildKb { input, output } => {
            let output = output.unwrap_or_else(|| cfg.corpus.dir.clone());
            let summary = kb_build::build_knowledge_base(&input, &output)?;
            println!("build-kb");
            println!("  files read: {}", summary.files_read);
            println!("  pages kept: {}", summary.pages_kept);
            println!("  lines skipped: {}", summary.lines_skipped);
            println!("  domains written: {}", summary.domains_written);
            println!("ok");
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
