//! Merge pass: raw page files in, one cleaned corpus file out.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use tokio::io::AsyncWriteExt;

use super::normalizer::TextNormalizer;
use super::value_filter::ValueFilter;
use crate::page_store;

/// Counters reported after a merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSummary {
    pub pages_seen: usize,
    pub pages_kept: usize,
    pub bytes_written: u64,
}

/// Walks every stored page, normalizes and filters it, and concatenates the
/// survivors into the corpus file. Runs strictly after all crawls join, so
/// it never races an in-flight page write.
pub struct Merger {
    normalizer: TextNormalizer,
    filter: ValueFilter,
}

impl Merger {
    #[must_use]
    pub fn new(normalizer: TextNormalizer, filter: ValueFilter) -> Self {
        Self { normalizer, filter }
    }

    /// Merge all page files under `raw_pages_dir` into `output_path`,
    /// overwriting any previous corpus. Sites and pages are visited in
    /// directory order; the corpus is an unordered bag of documents, each
    /// followed by a blank line.
    pub async fn merge(&self, raw_pages_dir: &Path, output_path: &Path) -> Result<MergeSummary> {
        let mut summary = MergeSummary::default();

        let mut output = tokio::fs::File::create(output_path)
            .await
            .with_context(|| format!("failed to create corpus file {}", output_path.display()))?;

        let mut site_dirs = match tokio::fs::read_dir(raw_pages_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "no raw pages under {} ({e}); writing an empty corpus",
                    raw_pages_dir.display()
                );
                output.flush().await?;
                return Ok(summary);
            }
        };

        while let Some(site_entry) = site_dirs.next_entry().await? {
            if !site_entry.file_type().await?.is_dir() {
                continue;
            }
            let site_path = site_entry.path();
            let mut pages = tokio::fs::read_dir(&site_path)
                .await
                .with_context(|| format!("failed to read site directory {}", site_path.display()))?;
            while let Some(page_entry) = pages.next_entry().await? {
                let page_path = page_entry.path();
                if page_path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                    continue;
                }
                summary.pages_seen += 1;

                let contents = match tokio::fs::read_to_string(&page_path).await {
                    Ok(contents) => contents,
                    Err(e) => {
                        warn!("skipping unreadable page {}: {e}", page_path.display());
                        continue;
                    }
                };
                let cleaned = self.normalizer.normalize(page_store::page_body(&contents));
                if !self.filter.is_valuable(&cleaned) {
                    debug!("filtered low-value page {}", page_path.display());
                    continue;
                }

                output.write_all(cleaned.as_bytes()).await?;
                output.write_all(b"\n\n").await?;
                summary.pages_kept += 1;
                summary.bytes_written += cleaned.len() as u64 + 2;
            }
        }

        output.flush().await?;
        info!(
            "merged {} of {} pages into {}",
            summary.pages_kept,
            summary.pages_seen,
            output_path.display()
        );
        Ok(summary)
    }
}
