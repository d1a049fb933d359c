//! Document discovery in the corpus directory.
//!
//! Only regular files directly inside the directory are considered, and a
//! file qualifies when its name matches one of the include globs
//! (case-insensitive, so `RATES.JSON` matches `*.json`).
//!
//! With `follow_links`, a symlink counts as the file it points to; a
//! dangling link is logged and skipped.
//!
//! A missing directory is not an error: it yields no documents. A path
//! that runs through a regular file (`kb.json/sub`) counts as missing.
//! Any other failure to read the directory itself propagates to the
//! caller.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A candidate document file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    /// File name, used as the chunk `source`.
    pub name: String,
    pub path: PathBuf,
}

/// List the document files in `root` whose names match `include_globs`.
///
/// Results are sorted by file name so a single run is deterministic.
pub fn discover_documents(
    root: &Path,
    include_globs: &[String],
    follow_links: bool,
) -> Result<Vec<DocumentFile>> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            warn!(path = %root.display(), "corpus path is not a directory; no documents loaded");
            return Ok(Vec::new());
        }
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            warn!(path = %root.display(), "corpus directory not found; no documents loaded");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to access corpus directory: {}", root.display()))
        }
    }

    let include_set = build_globset(include_globs)?;
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(follow_links)
        .min_depth(1)
        .max_depth(1);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e).with_context(|| {
                    format!("Failed to list corpus directory: {}", root.display())
                })
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable or dangling directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if !include_set.is_match(&name) {
            debug!(file = %name, "not a document; skipping");
            continue;
        }

        files.push(DocumentFile {
            name,
            path: entry.into_path(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(files)
}

/// Compile case-insensitive file-name globs.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(GlobBuilder::new(pattern).case_insensitive(true).build()?);
    }
    Ok(builder.build()?)
}
