//! Prompt context assembly.
//!
//! Joins retrieved chunks into the single context string handed to the
//! answer-generation step:
//!
//! ```text
//! [Source: gst.json #0]
//! GST rate is five percent ...
//!
//! ---
//!
//! [Source: income_tax.json #2]
//! ...
//! ```
//!
//! The result never exceeds `max_chars` characters. A block that would
//! overflow the budget is cut at a character boundary and nothing after it
//! is added.

use kb_retriever_core::models::RetrievedChunk;

/// Separator placed between chunk blocks.
pub const SEPARATOR: &str = "\n\n---\n\n";

/// Citation header for one chunk.
pub fn citation(chunk: &RetrievedChunk) -> String {
    format!("[Source: {} #{}]", chunk.source, chunk.chunk_id)
}

/// Render `chunks` as a context string of at most `max_chars` characters.
///
/// Returns an empty string when `chunks` is empty.
pub fn build_context(chunks: &[RetrievedChunk], max_chars: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;

    for (i, chunk) in chunks.iter().enumerate() {
        let mut block = String::new();
        if i > 0 {
            block.push_str(SEPARATOR);
        }
        block.push_str(&citation(chunk));
        block.push('\n');
        block.push_str(&chunk.text);

        let block_chars = block.chars().count();
        if used + block_chars <= max_chars {
            out.push_str(&block);
            used += block_chars;
            continue;
        }

        let remaining = max_chars - used;
        out.extend(block.chars().take(remaining));
        break;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(source: &str, id: usize, text: &str) -> RetrievedChunk {
        RetrievedChunk {
            source: source.to_string(),
            chunk_id: id,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(build_context(&[], 100), "");
    }

    #[test]
    fn test_joins_with_citations() {
        let out = build_context(
            &[chunk("gst.json", 0, "five percent"), chunk("itr.json", 2, "new slabs")],
            10_000,
        );
        assert_eq!(
            out,
            "[Source: gst.json #0]\nfive percent\n\n---\n\n[Source: itr.json #2]\nnew slabs"
        );
    }

    #[test]
    fn test_budget_truncates_and_stops() {
        let chunks = [
            chunk("a.json", 0, "aaaa"),
            chunk("b.json", 0, "bbbb"),
            chunk("c.json", 0, "cccc"),
        ];
        let full = build_context(&chunks, 10_000);
        for budget in [1, 10, 25, 30, 45, full.chars().count()] {
            let out = build_context(&chunks, budget);
            assert!(out.chars().count() <= budget, "budget {} exceeded", budget);
            assert!(full.starts_with(&out));
        }
    }

    #[test]
    fn test_budget_counts_characters() {
        // 20-character header line, then two of the five rupee signs.
        let out = build_context(&[chunk("r.json", 0, "₹₹₹₹₹")], 22);
        assert_eq!(out.chars().count(), 22);
        assert!(out.ends_with("\n₹₹"));
        assert!(out.ends_with('₹'));
    }
}
