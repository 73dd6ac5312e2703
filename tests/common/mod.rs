//! Scripted in-memory renderer shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use corpuscrawl::{FetchError, PageRenderer, RenderSession, RenderedPage};

/// Renderer whose sessions serve pages from a fixed map (keyed by normalized
/// URL), recording every fetched URL along the way.
#[derive(Clone)]
pub struct MockRenderer {
    pages: Arc<HashMap<String, (String, Vec<String>)>>,
    fetch_log: Arc<Mutex<Vec<String>>>,
    fail_to_open: bool,
}

impl MockRenderer {
    pub fn new(pages: Vec<(&str, &str, Vec<&str>)>) -> Self {
        let map = pages
            .into_iter()
            .map(|(url, text, links)| {
                (
                    url.to_string(),
                    (
                        text.to_string(),
                        links.into_iter().map(str::to_string).collect(),
                    ),
                )
            })
            .collect();
        Self {
            pages: Arc::new(map),
            fetch_log: Arc::new(Mutex::new(Vec::new())),
            fail_to_open: false,
        }
    }

    /// A renderer whose sessions never open; models a browser that cannot
    /// launch.
    pub fn failing() -> Self {
        Self {
            pages: Arc::new(HashMap::new()),
            fetch_log: Arc::new(Mutex::new(Vec::new())),
            fail_to_open: true,
        }
    }

    /// Every URL fetched through any session of this renderer, in order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetch_log.lock().expect("fetch log poisoned").clone()
    }
}

impl PageRenderer for MockRenderer {
    type Session = MockSession;

    fn open_session(&self) -> impl Future<Output = anyhow::Result<MockSession>> + Send {
        let session = MockSession {
            pages: Arc::clone(&self.pages),
            fetch_log: Arc::clone(&self.fetch_log),
        };
        let fail = self.fail_to_open;
        async move {
            if fail {
                anyhow::bail!("render session unavailable");
            }
            Ok(session)
        }
    }
}

pub struct MockSession {
    pages: Arc<HashMap<String, (String, Vec<String>)>>,
    fetch_log: Arc<Mutex<Vec<String>>>,
}

impl RenderSession for MockSession {
    fn fetch(
        &mut self,
        url: &str,
    ) -> impl Future<Output = Result<RenderedPage, FetchError>> + Send {
        self.fetch_log
            .lock()
            .expect("fetch log poisoned")
            .push(url.to_string());
        let result = self.pages.get(url).cloned();
        let url = url.to_string();
        async move {
            match result {
                Some((text, links)) => Ok(RenderedPage { text, links }),
                None => Err(FetchError::Navigation(format!(
                    "no page scripted for {url}"
                ))),
            }
        }
    }

    fn close(self) -> impl Future<Output = ()> + Send {
        async {}
    }
}

/// `count` distinct whitespace-delimited words.
pub fn words(count: usize) -> String {
    (0..count)
        .map(|i| format!("w{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}
