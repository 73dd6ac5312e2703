//! Core configuration types for a harvest run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One site to crawl: a unique display name and the seed URL its frontier
/// starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSpec {
    pub name: String,
    pub seed_url: String,
}

/// Characters preserved by text normalization: the Arabic block, ASCII
/// digits, whitespace and sentence punctuation. Everything else becomes a
/// space.
pub const DEFAULT_ALLOWED_TEXT_PATTERN: &str = r"[^\u{0600}-\u{06FF}0-9\s.!؟،؛]";

/// Full configuration for one run, supplied once at startup and immutable
/// for the duration of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    pub(crate) storage_dir: PathBuf,
    pub(crate) sites: Vec<SiteSpec>,
    #[serde(default = "default_max_concurrency")]
    pub(crate) max_concurrency: usize,
    #[serde(default = "default_page_limit")]
    pub(crate) page_limit_per_site: usize,
    #[serde(default = "default_request_delay_ms")]
    pub(crate) request_delay_ms: u64,
    #[serde(default = "default_min_word_count")]
    pub(crate) min_word_count: usize,
    #[serde(default = "default_allowed_text_pattern")]
    pub(crate) allowed_text_pattern: String,
    #[serde(default = "default_headless")]
    pub(crate) headless: bool,
}

pub(crate) fn default_max_concurrency() -> usize {
    8
}

pub(crate) fn default_page_limit() -> usize {
    1_000
}

pub(crate) fn default_request_delay_ms() -> u64 {
    500
}

pub(crate) fn default_min_word_count() -> usize {
    30
}

pub(crate) fn default_allowed_text_pattern() -> String {
    DEFAULT_ALLOWED_TEXT_PATTERN.to_string()
}

pub(crate) fn default_headless() -> bool {
    true
}

impl HarvestConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would otherwise fail mid-run: duplicate
    /// site names, a zero-sized worker pool, or an allowed-text pattern that
    /// does not compile.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            anyhow::bail!("max_concurrency must be at least 1");
        }
        let mut names = HashSet::new();
        for site in &self.sites {
            if !names.insert(site.name.as_str()) {
                anyhow::bail!("duplicate site name: {}", site.name);
            }
        }
        regex::Regex::new(&self.allowed_text_pattern).with_context(|| {
            format!("invalid allowed_text_pattern: {}", self.allowed_text_pattern)
        })?;
        Ok(())
    }

    #[must_use]
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    #[must_use]
    pub fn sites(&self) -> &[SiteSpec] {
        &self.sites
    }

    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    #[must_use]
    pub fn page_limit_per_site(&self) -> usize {
        self.page_limit_per_site
    }

    /// Fixed politeness pause applied after each fetch.
    #[must_use]
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    #[must_use]
    pub fn min_word_count(&self) -> usize {
        self.min_word_count
    }

    #[must_use]
    pub fn allowed_text_pattern(&self) -> &str {
        &self.allowed_text_pattern
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    /// Directory raw per-site page captures land in.
    #[must_use]
    pub fn raw_pages_dir(&self) -> PathBuf {
        self.storage_dir.join("raw_pages")
    }

    /// Durable completion checkpoint location.
    #[must_use]
    pub fn checkpoint_path(&self) -> PathBuf {
        self.storage_dir.join("checkpoint.json")
    }

    /// Final merged corpus location.
    #[must_use]
    pub fn corpus_path(&self) -> PathBuf {
        self.storage_dir.join("corpus.txt")
    }
}
