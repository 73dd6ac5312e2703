//! Cross-site orchestration: a bounded worker pool over the configured site
//! list, checkpoint-driven resume, and the single post-crawl merge.

use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::checkpoint::CheckpointStore;
use crate::config::{HarvestConfig, SiteSpec};
use crate::corpus::{MergeSummary, Merger, TextNormalizer, ValueFilter};
use crate::crawl_engine::SiteCrawler;
use crate::render::{PageRenderer, RenderSession};

pub struct Orchestrator<R> {
    config: Arc<HarvestConfig>,
    renderer: Arc<R>,
    checkpoint: Arc<CheckpointStore>,
}

impl<R: PageRenderer> Orchestrator<R> {
    /// Build an orchestrator, loading prior progress from the configured
    /// checkpoint path.
    #[must_use]
    pub fn new(config: HarvestConfig, renderer: R) -> Self {
        let checkpoint = Arc::new(CheckpointStore::load(config.checkpoint_path()));
        Self {
            config: Arc::new(config),
            renderer: Arc::new(renderer),
            checkpoint,
        }
    }

    /// Shared handle to the completion checkpoint.
    #[must_use]
    pub fn checkpoint(&self) -> &Arc<CheckpointStore> {
        &self.checkpoint
    }

    /// Crawl every configured site that is not already checkpointed, wait
    /// for all workers, then merge the accumulated raw pages into the
    /// corpus. A failing site never aborts the run; it is simply left
    /// incomplete for the next invocation.
    pub async fn run(&self) -> Result<MergeSummary> {
        tokio::fs::create_dir_all(self.config.raw_pages_dir())
            .await
            .with_context(|| {
                format!(
                    "failed to create storage directory {}",
                    self.config.raw_pages_dir().display()
                )
            })?;

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency()));
        let mut workers = Vec::new();

        for site in self.config.sites() {
            if self.checkpoint.is_completed(&site.name).await {
                info!("[{}] already completed, skipping", site.name);
                continue;
            }

            let site = site.clone();
            let config = Arc::clone(&self.config);
            let renderer = Arc::clone(&self.renderer);
            let checkpoint = Arc::clone(&self.checkpoint);
            let semaphore = Arc::clone(&semaphore);

            workers.push(tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    error!("[{}] worker pool closed unexpectedly", site.name);
                    return;
                };
                crawl_site(&site, &config, renderer.as_ref(), &checkpoint).await;
            }));
        }

        for worker in workers {
            if let Err(e) = worker.await {
                error!("site worker panicked: {e}");
            }
        }

        let normalizer = TextNormalizer::new(self.config.allowed_text_pattern())?;
        let filter = ValueFilter::new(self.config.min_word_count());
        let merger = Merger::new(normalizer, filter);
        merger
            .merge(&self.config.raw_pages_dir(), &self.config.corpus_path())
            .await
    }
}

/// One worker: open a render session, crawl the site, release the session on
/// every exit path, checkpoint only on success. Failures are logged and stay
/// contained to this site.
async fn crawl_site<R: PageRenderer>(
    site: &SiteSpec,
    config: &HarvestConfig,
    renderer: &R,
    checkpoint: &CheckpointStore,
) {
    info!("[{}] starting crawl of {}", site.name, site.seed_url);

    let session = match renderer.open_session().await {
        Ok(session) => session,
        Err(e) => {
            error!("[{}] could not open render session: {e:#}", site.name);
            return;
        }
    };

    let mut crawler = SiteCrawler::new(
        session,
        site.name.clone(),
        &config.raw_pages_dir(),
        config.page_limit_per_site(),
        config.request_delay(),
    );
    let outcome = crawler.crawl(&site.seed_url).await;
    crawler.into_session().close().await;

    match outcome {
        Ok(summary) => {
            info!(
                "[{}] finished: {} pages stored, {} fetch failures, {} urls seen",
                site.name, summary.pages_stored, summary.fetch_failures, summary.urls_seen
            );
            if let Err(e) = checkpoint.mark_completed(&site.name).await {
                error!(
                    "[{}] completed but checkpoint write failed: {e:#}",
                    site.name
                );
            }
        }
        Err(e) => {
            error!("[{}] crawl failed, site left incomplete: {e:#}", site.name);
        }
    }
}
