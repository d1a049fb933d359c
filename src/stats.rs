//! Corpus statistics.
//!
//! Loads the corpus the same way a query would and prints what was
//! indexed: documents, chunks, and a per-source breakdown. Used by
//! `kbr stats` to confirm a knowledge-base directory is picked up.

use anyhow::Result;

use crate::config::Config;
use crate::retriever::Retriever;

pub fn run_stats(config: &Config) -> Result<()> {
    let retriever = Retriever::new(config)?;
    let corpus = retriever.load()?;

    println!("kb-retriever — Corpus Stats");
    println!("===========================");
    println!();
    println!("  Directory:   {}", config.corpus.dir.display());
    println!(
        "  Window:      {} words ({} overlap)",
        config.chunking.max_words, config.chunking.overlap_words
    );
    println!();
    println!("  Documents:   {}", corpus.document_count());
    println!("  Chunks:      {}", corpus.len());

    let per_source = corpus.chunks_per_source();
    if !per_source.is_empty() {
        println!();
        println!("  {:<40} {:>8}", "SOURCE", "CHUNKS");
        for (source, count) in per_source {
            println!("  {:<40} {:>8}", source, count);
        }
    }

    Ok(())
}
