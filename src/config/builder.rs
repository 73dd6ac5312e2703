//! Typestate builder for [`HarvestConfig`].
//!
//! `build()` only exists once `storage_dir` has been supplied, so an
//! unrooted configuration is a compile error rather than a runtime one.

use anyhow::Result;
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::{
    HarvestConfig, SiteSpec, default_allowed_text_pattern, default_headless, default_max_concurrency,
    default_min_word_count, default_page_limit, default_request_delay_ms,
};

pub struct WithStorageDir;

pub struct HarvestConfigBuilder<State = ()> {
    pub(crate) storage_dir: Option<PathBuf>,
    pub(crate) sites: Vec<SiteSpec>,
    pub(crate) max_concurrency: usize,
    pub(crate) page_limit_per_site: usize,
    pub(crate) request_delay_ms: u64,
    pub(crate) min_word_count: usize,
    pub(crate) allowed_text_pattern: String,
    pub(crate) headless: bool,
    pub(crate) _state: PhantomData<State>,
}

impl Default for HarvestConfigBuilder<()> {
    fn default() -> Self {
        Self {
            storage_dir: None,
            sites: Vec::new(),
            max_concurrency: default_max_concurrency(),
            page_limit_per_site: default_page_limit(),
            request_delay_ms: default_request_delay_ms(),
            min_word_count: default_min_word_count(),
            allowed_text_pattern: default_allowed_text_pattern(),
            headless: default_headless(),
            _state: PhantomData,
        }
    }
}

impl HarvestConfig {
    /// Create a builder for configuring a run with a fluent interface.
    #[must_use]
    pub fn builder() -> HarvestConfigBuilder<()> {
        HarvestConfigBuilder::default()
    }
}

impl HarvestConfigBuilder<()> {
    pub fn storage_dir(self, dir: impl Into<PathBuf>) -> HarvestConfigBuilder<WithStorageDir> {
        HarvestConfigBuilder {
            storage_dir: Some(dir.into()),
            sites: self.sites,
            max_concurrency: self.max_concurrency,
            page_limit_per_site: self.page_limit_per_site,
            request_delay_ms: self.request_delay_ms,
            min_word_count: self.min_word_count,
            allowed_text_pattern: self.allowed_text_pattern,
            headless: self.headless,
            _state: PhantomData,
        }
    }
}

impl<State> HarvestConfigBuilder<State> {
    /// Append one site to the crawl list.
    #[must_use]
    pub fn site(mut self, name: impl Into<String>, seed_url: impl Into<String>) -> Self {
        self.sites.push(SiteSpec {
            name: name.into(),
            seed_url: seed_url.into(),
        });
        self
    }

    /// Replace the crawl list wholesale.
    #[must_use]
    pub fn sites(mut self, sites: Vec<SiteSpec>) -> Self {
        self.sites = sites;
        self
    }

    #[must_use]
    pub fn max_concurrency(mut self, value: usize) -> Self {
        self.max_concurrency = value;
        self
    }

    #[must_use]
    pub fn page_limit_per_site(mut self, value: usize) -> Self {
        self.page_limit_per_site = value;
        self
    }

    #[must_use]
    pub fn request_delay_ms(mut self, value: u64) -> Self {
        self.request_delay_ms = value;
        self
    }

    #[must_use]
    pub fn min_word_count(mut self, value: usize) -> Self {
        self.min_word_count = value;
        self
    }

    #[must_use]
    pub fn allowed_text_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.allowed_text_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn headless(mut self, value: bool) -> Self {
        self.headless = value;
        self
    }
}

impl HarvestConfigBuilder<WithStorageDir> {
    /// Validate and build the configuration.
    pub fn build(self) -> Result<HarvestConfig> {
        let storage_dir = self
            .storage_dir
            .ok_or_else(|| anyhow::anyhow!("storage_dir is required"))?;
        let config = HarvestConfig {
            storage_dir,
            sites: self.sites,
            max_concurrency: self.max_concurrency,
            page_limit_per_site: self.page_limit_per_site,
            request_delay_ms: self.request_delay_ms,
            min_word_count: self.min_word_count,
            allowed_text_pattern: self.allowed_text_pattern,
            headless: self.headless,
        };
        config.validate()?;
        Ok(config)
    }
}
