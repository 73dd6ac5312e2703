//! corpuscrawl: breadth-first multi-site crawling into a cleaned text corpus.
//!
//! A run crawls every configured site through a headless-browser render
//! session (one per site worker), stores each fetched page as an individual
//! raw file, records per-site completion in a durable checkpoint so
//! interrupted runs resume where they left off, and finishes by merging all
//! raw pages into a single normalized, filtered corpus file.

pub mod checkpoint;
pub mod config;
pub mod corpus;
pub mod crawl_engine;
pub mod orchestrator;
pub mod page_store;
pub mod render;
pub mod utils;

pub use checkpoint::CheckpointStore;
pub use config::{DEFAULT_ALLOWED_TEXT_PATTERN, HarvestConfig, HarvestConfigBuilder, SiteSpec};
pub use corpus::{MergeSummary, Merger, TextNormalizer, ValueFilter};
pub use crawl_engine::{CrawlSummary, Frontier, SiteCrawler};
pub use orchestrator::Orchestrator;
pub use page_store::PageRecord;
pub use render::{
    ChromiumRenderer, ChromiumSession, FetchError, PageRenderer, RenderSession, RenderedPage,
};

use anyhow::Result;

/// Run a full harvest with the production Chromium renderer: crawl every
/// unfinished site, then merge the corpus.
pub async fn harvest(config: HarvestConfig) -> Result<MergeSummary> {
    let renderer = ChromiumRenderer::new(config.headless());
    let orchestrator = Orchestrator::new(config, renderer);
    orchestrator.run().await
}
