//! Per-site breadth-first crawl engine.

pub mod frontier;
pub mod site_crawler;

pub use frontier::Frontier;
pub use site_crawler::{CrawlSummary, SiteCrawler};
