//! Helper functions for consistent chromiumoxide Page handling
//!
//! `PageGuard` closes pages on every exit path, the rest wrap common Page
//! operations with timeouts and diagnostic fallbacks.

use anyhow::{Result, anyhow};
use chromiumoxide::page::Page;
use std::future::Future;
use std::ops::Deref;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Closes the wrapped page when dropped
///
/// The close is spawned onto the current runtime since `Drop` cannot await.
/// Early returns, `?` and timeouts all go through here.
pub struct PageGuard {
    page: Page,
    label: String,
}

impl PageGuard {
    pub fn new(page: Page, label: impl Into<String>) -> Self {
        Self {
            page,
            label: label.into(),
        }
    }
}

impl Deref for PageGuard {
    type Target = Page;

    fn deref(&self) -> &Page {
        &self.page
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        let page = self.page.clone();
        let label = std::mem::take(&mut self.label);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = page.close().await {
                        trace!("Failed to close page '{}': {}", label, e);
                    } else {
                        trace!("Closed page '{}'", label);
                    }
                });
            }
            Err(_) => trace!("No runtime available to close page '{}'", label),
        }
    }
}

/// Run a page operation with a timeout, naming it in the error
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout: Duration,
    operation_name: &str,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(anyhow!(
            "{operation_name} timeout after {} seconds",
            timeout.as_secs()
        )),
    }
}

/// Get page URL, `about:blank` on any failure
pub async fn get_page_url_with_fallback(page: &Page) -> String {
    match page.url().await {
        Ok(Some(url)) => url,
        Ok(None) => {
            trace!("Page URL is None (page not yet navigated)");
            "about:blank".to_string()
        }
        Err(e) => {
            trace!("Failed to get page URL (browser communication error): {}", e);
            "about:blank".to_string()
        }
    }
}

/// Poll until any of `selectors` is present in the DOM.
///
/// Returns the selector that matched. Fails after `max_wait`, with a
/// distinct message when the page turned out to be a CAPTCHA interstitial.
pub async fn wait_for_any_selector(
    page: &Page,
    selectors: &[&'static str],
    max_wait: Duration,
) -> Result<&'static str> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(200);

    loop {
        for &selector in selectors {
            if page.find_element(selector).await.is_ok() {
                debug!(
                    selector,
                    "Selector appeared after {:.2}s",
                    start.elapsed().as_secs_f64()
                );
                return Ok(selector);
            }
        }

        if start.elapsed() >= max_wait {
            let url = get_page_url_with_fallback(page).await;
            if looks_like_captcha(&url) {
                return Err(anyhow!(
                    "CAPTCHA page presented at {url}. Try again later or use a different network."
                ));
            }
            return Err(anyhow!(
                "Timeout waiting for results at {url}. None of {selectors:?} appeared within {}s",
                max_wait.as_secs()
            ));
        }

        tokio::time::sleep(poll_interval).await;
    }
}

pub(crate) fn looks_like_captcha(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    url.contains("/sorry/") || url.contains("captcha") || url.contains("challenge")
}
