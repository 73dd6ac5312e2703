//! Page rendering seam.
//!
//! The crawl engine never talks to a browser directly; it drives a
//! [`RenderSession`] obtained from a [`PageRenderer`]. The production
//! implementation renders through headless Chrome (see [`chromium`]); tests
//! substitute a scripted in-memory renderer.

pub mod chromium;

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

pub use chromium::{ChromiumRenderer, ChromiumSession};

/// Rendered result for one URL: the page's visible text and every outbound
/// link discovered on it, as emitted by the page (possibly relative).
#[derive(Debug, Clone, Deserialize)]
pub struct RenderedPage {
    pub text: String,
    pub links: Vec<String>,
}

/// Failure of a single fetch. Terminal for that frontier entry only; the
/// crawler performs no retries.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("page evaluation failed: {0}")]
    Evaluation(String),
}

/// A live rendering session, held by exactly one site crawler.
pub trait RenderSession: Send + 'static {
    /// Fetch one URL, returning its rendered text and outbound links.
    fn fetch(
        &mut self,
        url: &str,
    ) -> impl Future<Output = Result<RenderedPage, FetchError>> + Send;

    /// Release the session and any resources behind it.
    fn close(self) -> impl Future<Output = ()> + Send;
}

/// Factory for rendering sessions; one session is opened per site worker and
/// released when that site's crawl ends.
pub trait PageRenderer: Send + Sync + 'static {
    type Session: RenderSession;

    fn open_session(&self) -> impl Future<Output = anyhow::Result<Self::Session>> + Send;
}
