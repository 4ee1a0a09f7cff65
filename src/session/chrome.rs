// src/session/chrome.rs
// Headless Chromium (DevTools protocol) behind the DeckPage seam.
// One browser, one tab, reused for every deck of a run.

use std::path::Path;
use std::time::Duration;

use chromiumoxide::error::CdpError;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::config::options::DriverTimings;
use crate::error::ScrapeError;

use super::page::{DeckPage, PageError};

const REQUEST_TIMEOUT_FLOOR: Duration = Duration::from_secs(30);

pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
}

impl ChromeSession {
    pub async fn launch(headed: bool, timings: &DriverTimings) -> Result<Self, ScrapeError> {
        let mut builder = BrowserConfig::builder().request_timeout(request_timeout(timings));
        if headed {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(ScrapeError::Browser)?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::Browser(format!("launch failed: {e}")))?;

        // The CDP connection only makes progress while its event stream is polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::Browser(format!("could not open a tab: {e}")))?;

        tracing::info!(headed, "browser ready");
        Ok(Self { browser, handler, page })
    }

    /// Close the browser and reap its process. Errors are logged, not returned.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::warn!("browser process wait failed: {e}");
        }
        self.handler.abort();
        tracing::info!("browser closed");
    }
}

/// CDP's own per-request timeout (30 s by default) also bounds `goto`; it must
/// not undercut the driver's navigation bound.
fn request_timeout(t: &DriverTimings) -> Duration {
    t.nav_timeout.max(REQUEST_TIMEOUT_FLOOR)
}

fn page_err(e: CdpError) -> PageError {
    match e {
        CdpError::Timeout => PageError::Timeout,
        other => PageError::Failed(other.to_string()),
    }
}

impl DeckPage for ChromeSession {
    async fn goto(&mut self, url: &str) -> Result<(), PageError> {
        self.page.goto(url).await.map(|_| ()).map_err(page_err)
    }

    async fn exists(&mut self, selector: &str) -> bool {
        self.page.find_element(selector).await.is_ok()
    }

    async fn click(&mut self, selector: &str) -> Result<(), PageError> {
        let el = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| PageError::NotFound(s!(selector)))?;
        el.click().await.map(|_| ()).map_err(page_err)
    }

    async fn labels(&mut self, selector: &str) -> Result<Vec<String>, PageError> {
        let els = self.page.find_elements(selector).await.map_err(page_err)?;
        let mut out = Vec::with_capacity(els.len());
        for el in &els {
            out.push(el.inner_text().await.map_err(page_err)?.unwrap_or_default());
        }
        Ok(out)
    }

    async fn click_nth(&mut self, selector: &str, index: usize) -> Result<(), PageError> {
        let els = self.page.find_elements(selector).await.map_err(page_err)?;
        let el = els
            .get(index)
            .ok_or_else(|| PageError::NotFound(format!("{selector} #{index}")))?;
        el.click().await.map(|_| ()).map_err(page_err)
    }

    async fn content(&mut self) -> Result<String, PageError> {
        self.page.content().await.map_err(page_err)
    }

    async fn screenshot(&mut self, path: &Path) -> Result<(), PageError> {
        let params = ScreenshotParams::builder().full_page(true).build();
        self.page.save_screenshot(params, path).await.map(|_| ()).map_err(page_err)
    }
}
