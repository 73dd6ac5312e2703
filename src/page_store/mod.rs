//! Raw page persistence.
//!
//! One file per fetched page: `{raw_root}/{site_dir}/page_{sequence_id}.txt`,
//! a `URL:` header line followed by the raw extracted text. Records are
//! written once and never mutated; the merger reads them back through
//! [`page_body`].

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A single captured page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub site_name: String,
    pub sequence_id: usize,
    pub source_url: String,
    pub raw_text: String,
}

/// Directory a site's pages land in, derived from its configured name.
/// Spaces become underscores and the result is made filesystem-safe.
#[must_use]
pub fn site_directory(raw_pages_dir: &Path, site_name: &str) -> PathBuf {
    let safe = sanitize_filename::sanitize(site_name.replace(' ', "_"));
    raw_pages_dir.join(safe)
}

/// Path of one page file within its site directory.
#[must_use]
pub fn page_path(site_dir: &Path, sequence_id: usize) -> PathBuf {
    site_dir.join(format!("page_{sequence_id}.txt"))
}

/// Persist a page record as an individual file.
pub async fn save_page(site_dir: &Path, record: &PageRecord) -> Result<()> {
    let path = page_path(site_dir, record.sequence_id);
    let contents = format!("URL: {}\n{}", record.source_url, record.raw_text);
    tokio::fs::write(&path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// The raw text of a stored page file, with the `URL:` header removed.
#[must_use]
pub fn page_body(contents: &str) -> &str {
    match contents.split_once('\n') {
        Some((header, body)) if header.starts_with("URL: ") => body,
        _ => contents,
    }
}
