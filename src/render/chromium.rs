//! chromiumoxide-backed page rendering.
//!
//! One headless Chrome process per session; the session reuses a single tab
//! for every navigation, the way a human-driven browser walks a site.

use anyhow::{Context, Result};
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use log::{debug, info, warn};
use std::future::Future;
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::task::{self, JoinHandle};

use super::{FetchError, PageRenderer, RenderSession, RenderedPage};

/// User agent reported by render sessions.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Script evaluated on every page: visible body text plus all anchor hrefs.
/// Hrefs are taken from the attribute, not the resolved property, so the
/// crawler decides how to resolve them.
const CAPTURE_SCRIPT: &str = r#"
    (() => {
        const text = document.body ? document.body.innerText : '';
        const links = Array.from(document.querySelectorAll('a[href]'))
            .map((a) => a.getAttribute('href'))
            .filter((href) => href !== null && href !== '');
        return { text, links };
    })()
"#;

/// Find a Chrome/Chromium executable: the `CHROMIUM_PATH` environment
/// variable overrides everything, then well-known install locations, then
/// `which` on Unix systems.
async fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH points to a non-existent file: {}",
            path.display()
        );
    }

    let paths: &[&str] = if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    };

    for path_str in paths {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in &["chromium", "chromium-browser", "google-chrome", "chrome"] {
            let output = Command::new("which").arg(cmd).output();
            if let Ok(output) = output
                && output.status.success()
            {
                let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path_str.is_empty() {
                    let path = PathBuf::from(path_str);
                    info!("found browser via 'which': {}", path.display());
                    return Ok(path);
                }
            }
        }
    }

    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Download a managed Chromium build when no system browser exists.
async fn download_managed_browser() -> Result<PathBuf> {
    info!("no system browser found, downloading managed Chromium");

    let cache_dir = std::env::temp_dir().join("corpuscrawl_chromium");
    std::fs::create_dir_all(&cache_dir).context("failed to create browser cache directory")?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .context("failed to build fetcher options")?,
    );
    let revision_info = fetcher.fetch().await.context("failed to fetch browser")?;

    info!(
        "downloaded Chromium to {}",
        revision_info.folder_path.display()
    );
    Ok(revision_info.executable_path)
}

/// Monotonic id so every session gets its own profile directory.
static SESSION_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Launch a browser process and spawn the task that drives its CDP
/// connection. Returns the profile directory so the session can remove it
/// when it closes.
async fn launch_browser(headless: bool) -> Result<(Browser, JoinHandle<()>, PathBuf)> {
    let chrome_path = match find_browser_executable().await {
        Ok(path) => path,
        Err(_) => download_managed_browser().await?,
    };

    // Unique profile per session; concurrent sessions must never contend on
    // a Chrome profile lock.
    let session_id = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    let user_data_dir = std::env::temp_dir().join(format!(
        "corpuscrawl_chrome_{}_{session_id}",
        std::process::id()
    ));
    std::fs::create_dir_all(&user_data_dir)
        .context("failed to create browser profile directory")?;

    let mut config_builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(1920, 1080)
        .user_data_dir(user_data_dir.clone())
        .chrome_executable(chrome_path);

    if headless {
        config_builder = config_builder.headless_mode(HeadlessMode::default());
    } else {
        config_builder = config_builder.with_head();
    }

    config_builder = config_builder
        .arg(format!("--user-agent={USER_AGENT}"))
        .arg("--disable-gpu")
        .arg("--blink-settings=imagesEnabled=false")
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--no-sandbox")
        .arg("--mute-audio");

    let browser_config = config_builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

    debug!("launching browser");
    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("failed to launch browser")?;

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                debug!("browser handler event error: {e}");
            }
        }
    });

    Ok((browser, handler_task, user_data_dir))
}

/// Renderer that opens one headless Chrome process per session.
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    headless: bool,
}

impl ChromiumRenderer {
    #[must_use]
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }
}

impl PageRenderer for ChromiumRenderer {
    type Session = ChromiumSession;

    fn open_session(&self) -> impl Future<Output = Result<ChromiumSession>> + Send {
        let headless = self.headless;
        async move {
            let (browser, handler_task, profile_dir) = launch_browser(headless).await?;
            let page = browser
                .new_page("about:blank")
                .await
                .context("failed to open browser tab")?;
            Ok(ChromiumSession {
                browser,
                handler_task,
                page,
                profile_dir,
            })
        }
    }
}

/// A single Chrome process plus the tab it renders in.
pub struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
    profile_dir: PathBuf,
}

impl RenderSession for ChromiumSession {
    fn fetch(
        &mut self,
        url: &str,
    ) -> impl Future<Output = Result<RenderedPage, FetchError>> + Send {
        async move {
            self.page
                .goto(url)
                .await
                .map_err(|e| FetchError::Navigation(e.to_string()))?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|e| FetchError::Navigation(e.to_string()))?;

            let evaluation = self
                .page
                .evaluate(CAPTURE_SCRIPT)
                .await
                .map_err(|e| FetchError::Evaluation(e.to_string()))?;
            evaluation
                .into_value::<RenderedPage>()
                .map_err(|e| FetchError::Evaluation(e.to_string()))
        }
    }

    fn close(mut self) -> impl Future<Output = ()> + Send {
        async move {
            if let Err(e) = self.browser.close().await {
                warn!("browser did not close cleanly: {e}");
            }
            let _ = self.browser.wait().await;
            self.handler_task.abort();
            if let Err(e) = std::fs::remove_dir_all(&self.profile_dir) {
                debug!(
                    "could not remove browser profile {}: {e}",
                    self.profile_dir.display()
                );
            }
        }
    }
}
