//! `kbr search` — run a query from the command line and print the hits.

use anyhow::Result;

use crate::config::Config;
use crate::context::{build_context, citation};
use crate::retriever::Retriever;

/// Characters of chunk text shown per hit.
const PREVIEW_CHARS: usize = 240;

pub fn run_search(
    config: &Config,
    query: &str,
    k: Option<usize>,
    min_chars: Option<usize>,
    as_context: bool,
) -> Result<()> {
    let retriever = Retriever::new(config)?;
    let defaults = retriever.defaults();
    let k = k.unwrap_or(defaults.k);
    let min_chars = min_chars.unwrap_or(defaults.min_chars);

    let result = retriever.retrieve_detailed(query, k, min_chars)?;

    if result.chunks.is_empty() {
        println!("No results.");
        return Ok(());
    }

    if as_context {
        println!("{}", build_context(&result.chunks, config.context.max_chars));
        return Ok(());
    }

    for (i, (chunk, score)) in result.chunks.iter().zip(&result.scores).enumerate() {
        println!("{}. {}  score={:.4}", i + 1, citation(chunk), score);
        println!("   {}", preview(&chunk.text));
        println!();
    }
    if result.degraded {
        println!(
            "note: no hit reached {} characters; showing the shorter matches",
            min_chars
        );
    }

    Ok(())
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    out.push('…');
    out
}
