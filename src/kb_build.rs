//! Build knowledge-base documents from extracted page records.
//!
//! Input is a directory of `*.jsonl` files, one page per line:
//!
//! ```json
//! {"file": "gst_act.pdf", "page": 3, "text": "Page 3 of 120\n..."}
//! ```
//!
//! Each page is cleaned (whitespace collapsed, `Page N of M` markers
//! removed) and blank pages are dropped. Pages are grouped into domains by
//! file stem up to the first `__` (`gst__act.jsonl` and `gst__rules.jsonl`
//! both belong to `gst`), merged in file-name order, and written as
//! `<output>/<domain>.json`:
//!
//! ```json
//! {"domain": "gst", "text": "..."}
//! ```
//!
//! That is the shape the corpus loader reads as direct text.

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, warn};

use kb_retriever_core::normalize::normalize_text;

use crate::connector_fs::discover_documents;

static PAGE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)page \d+ of \d+").expect("page marker pattern is valid"));

#[derive(Deserialize)]
struct PageRecord {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct KbRecord<'a> {
    domain: &'a str,
    text: String,
}

/// Counts reported after a build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub files_read: usize,
    pub pages_kept: usize,
    pub lines_skipped: usize,
    pub domains_written: usize,
}

/// Clean one page of extracted text.
pub fn clean_page(text: &str) -> String {
    let collapsed = normalize_text(text);
    normalize_text(&PAGE_MARKER_RE.replace_all(&collapsed, ""))
}

/// Domain name for a page-record file: its stem up to the first `__`.
///
/// Empty for names such as `__x.jsonl`; the builder skips those files.
pub fn domain_for(file_name: &str) -> &str {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    stem.split("__").next().unwrap_or(stem)
}

/// Read page records from `input_dir` and write one knowledge-base JSON
/// document per domain into `output_dir`.
///
/// Unlike the corpus directory, a missing input directory is an error.
pub fn build_knowledge_base(input_dir: &Path, output_dir: &Path) -> Result<BuildSummary> {
    if !input_dir.is_dir() {
        bail!("Input directory not found: {}", input_dir.display());
    }
    let files = discover_documents(input_dir, &["*.jsonl".to_string()], true)?;
    let mut summary = BuildSummary::default();
    let mut domains: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for file in &files {
        let domain = domain_for(&file.name);
        if domain.is_empty() {
            warn!(file = %file.name, "file name has no domain prefix; skipping");
            continue;
        }

        let content = std::fs::read_to_string(&file.path)
            .with_context(|| format!("Failed to read {}", file.path.display()))?;
        summary.files_read += 1;

        let pages = domains.entry(domain.to_string()).or_default();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: PageRecord = match serde_json::from_str(line) {
                Ok(record) => record,
                Err(e) => {
                    warn!(file = %file.name, line = lineno + 1, error = %e, "skipping malformed page record");
                    summary.lines_skipped += 1;
                    continue;
                }
            };
            let cleaned = clean_page(&record.text);
            if cleaned.is_empty() {
                continue;
            }
            pages.push(cleaned);
            summary.pages_kept += 1;
        }
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    for (domain, pages) in &domains {
        if pages.is_empty() {
            warn!(domain = %domain, "no text pages; not writing a document");
            continue;
        }
        let record = KbRecord {
            domain,
            text: pages.join("\n"),
        };
        let out_path = output_dir.join(format!("{}.json", domain));
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(&out_path, json)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        info!(domain = %domain, pages = pages.len(), path = %out_path.display(), "knowledge base document written");
        summary.domains_written += 1;
    }

    Ok(summary)
}
