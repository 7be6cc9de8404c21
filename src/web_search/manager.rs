//! Browser lifecycle manager
//!
//! Keeps one shared headless browser and one shared headed browser. Each is
//! launched on first use, reused by every later search, and relaunched when
//! a health check fails.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::browser::BrowserWrapper;
use crate::error::SearchError;
use crate::utils::DEFAULT_TIMEOUT_SECS;

type Slot = Arc<Mutex<Option<Arc<BrowserWrapper>>>>;

/// Manager for the browsers shared by searches and content extraction
///
/// # Lifecycle
/// - Nothing is launched on creation
/// - First `get_or_launch()` for a mode launches that browser (~2-3s)
/// - Later calls return the existing browser after a `version()` health check
/// - `shutdown()` closes everything (call before process exit)
///
/// Cloning is cheap and clones share the same browsers.
#[derive(Clone)]
pub struct BrowserManager {
    headless: Slot,
    headed: Slot,
    request_timeout: Duration,
}

impl BrowserManager {
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Manager whose browsers use `request_timeout` for CDP requests
    #[must_use]
    pub fn with_request_timeout(request_timeout: Duration) -> Self {
        Self {
            headless: Arc::new(Mutex::new(None)),
            headed: Arc::new(Mutex::new(None)),
            request_timeout,
        }
    }

    fn slot(&self, headless: bool) -> &Slot {
        if headless { &self.headless } else { &self.headed }
    }

    /// Get the shared browser for `headless`, launching or relaunching it as
    /// needed.
    ///
    /// The slot lock is held across the launch so concurrent callers wait for
    /// one browser instead of racing to start several.
    pub async fn get_or_launch(&self, headless: bool) -> Result<Arc<BrowserWrapper>> {
        let mut guard = self.slot(headless).lock().await;

        if let Some(wrapper) = guard.as_ref() {
            if wrapper.is_healthy().await {
                debug!(headless, "Reusing existing browser");
                return Ok(Arc::clone(wrapper));
            }

            warn!(headless, "Browser unhealthy, relaunching");
            if let Some(crashed) = guard.take() {
                Self::close_wrapper(crashed).await;
            }
        }

        info!(headless, "Launching browser (first time or after recovery)");
        let wrapper = Arc::new(BrowserWrapper::launch(headless, self.request_timeout).await?);
        *guard = Some(Arc::clone(&wrapper));

        Ok(wrapper)
    }

    /// Launch the browser for `headless` ahead of any search.
    ///
    /// Searches launch on first use, inside their own timeout. A cold start
    /// can include a Chromium download, so plan runs call this first.
    ///
    /// # Errors
    ///
    /// `SearchError::Browser` if no browser could be found, downloaded or
    /// started.
    pub async fn warm_up(&self, headless: bool) -> Result<(), SearchError> {
        self.get_or_launch(headless)
            .await
            .map(|_| ())
            .map_err(|e| SearchError::Browser(format!("{e:#}")))
    }

    /// Shut down every running browser.
    ///
    /// Safe to call more than once.
    pub async fn shutdown(&self) -> Result<()> {
        for headless in [true, false] {
            let taken = self.slot(headless).lock().await.take();
            if let Some(wrapper) = taken {
                info!(headless, "Shutting down browser");
                Self::close_wrapper(wrapper).await;
            }
        }
        Ok(())
    }

    async fn close_wrapper(wrapper: Arc<BrowserWrapper>) {
        match Arc::try_unwrap(wrapper) {
            Ok(wrapper) => wrapper.close().await,
            // Still borrowed by an in-flight search; the last holder's drop
            // aborts the handler and removes the profile
            Err(_) => warn!("Browser still in use during shutdown, deferring cleanup to drop"),
        }
    }
}

impl Default for BrowserManager {
    fn default() -> Self {
        Self::new()
    }
}
