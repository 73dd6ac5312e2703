//! Breadth-first crawl of a single site.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use super::frontier::Frontier;
use crate::page_store::{self, PageRecord};
use crate::render::{RenderSession, RenderedPage};
use crate::utils::url_utils::{
    has_blocked_extension, in_scope, is_fetchable, normalize_url, resolve_link,
};

/// Counters reported after a site finishes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlSummary {
    pub pages_stored: usize,
    pub fetch_failures: usize,
    pub urls_seen: usize,
}

/// Crawls one site breadth-first through a dedicated render session,
/// persisting each successfully fetched page as it goes.
///
/// The crawler owns its frontier and page stream outright; nothing else
/// touches them while the crawl runs.
pub struct SiteCrawler<S> {
    session: S,
    site_name: String,
    site_dir: PathBuf,
    page_limit: usize,
    request_delay: Duration,
    frontier: Frontier,
    pages_stored: usize,
    fetch_failures: usize,
}

impl<S: RenderSession> SiteCrawler<S> {
    pub fn new(
        session: S,
        site_name: impl Into<String>,
        raw_pages_dir: &Path,
        page_limit: usize,
        request_delay: Duration,
    ) -> Self {
        let site_name = site_name.into();
        let site_dir = page_store::site_directory(raw_pages_dir, &site_name);
        Self {
            session,
            site_name,
            site_dir,
            page_limit,
            request_delay,
            frontier: Frontier::new(),
            pages_stored: 0,
            fetch_failures: 0,
        }
    }

    /// Crawl from `seed_url` until the frontier drains or the page ceiling is
    /// reached. Individual fetch failures are logged and skipped; only a
    /// malformed seed or an unwritable page store aborts the site.
    pub async fn crawl(&mut self, seed_url: &str) -> Result<CrawlSummary> {
        let seed = Url::parse(seed_url)
            .with_context(|| format!("invalid seed URL for {}: {seed_url}", self.site_name))?;
        let seed_host = seed
            .host_str()
            .with_context(|| format!("seed URL for {} has no host: {seed_url}", self.site_name))?
            .to_string();

        tokio::fs::create_dir_all(&self.site_dir)
            .await
            .with_context(|| {
                format!("failed to create site directory {}", self.site_dir.display())
            })?;

        self.frontier.enqueue(normalize_url(seed_url));

        while self.pages_stored < self.page_limit {
            let Some(url) = self.frontier.pop() else {
                break;
            };
            // Backstop: a URL queued twice is fetched at most once, and a
            // duplicate pop burns no ceiling slot.
            if self.frontier.is_visited(&url) {
                continue;
            }

            let rendered = match self.session.fetch(&url).await {
                Ok(rendered) => rendered,
                Err(e) => {
                    warn!("[{}] fetch failed for {url}: {e}", self.site_name);
                    self.fetch_failures += 1;
                    tokio::time::sleep(self.request_delay).await;
                    continue;
                }
            };
            let RenderedPage { text, links } = rendered;

            let record = PageRecord {
                site_name: self.site_name.clone(),
                sequence_id: self.pages_stored,
                source_url: url.clone(),
                raw_text: text,
            };
            page_store::save_page(&self.site_dir, &record)
                .await
                .with_context(|| {
                    format!(
                        "failed to persist page {} for {}",
                        record.sequence_id, self.site_name
                    )
                })?;

            self.frontier.mark_visited(url.clone());
            self.pages_stored += 1;
            info!(
                "[{}] stored page {} from {url}",
                self.site_name, self.pages_stored
            );

            tokio::time::sleep(self.request_delay).await;

            self.enqueue_links(&url, &seed_host, &links);
        }

        Ok(CrawlSummary {
            pages_stored: self.pages_stored,
            fetch_failures: self.fetch_failures,
            urls_seen: self.frontier.seen_count(),
        })
    }

    /// Resolve, filter and enqueue the outbound links of one page. A link
    /// that fails to resolve is skipped; the rest still process.
    fn enqueue_links(&mut self, page_url: &str, seed_host: &str, links: &[String]) {
        let Ok(base) = Url::parse(page_url) else {
            return;
        };
        for href in links {
            let Some(absolute) = resolve_link(&base, href) else {
                debug!("[{}] skipping unresolvable link {href}", self.site_name);
                continue;
            };
            if !is_fetchable(&absolute)
                || !in_scope(&absolute, seed_host)
                || has_blocked_extension(&absolute)
            {
                continue;
            }
            self.frontier.enqueue(normalize_url(absolute.as_str()));
        }
    }

    /// Hand the render session back so the caller can release it.
    pub fn into_session(self) -> S {
        self.session
    }
}
