//! Browser instance ownership
//!
//! A `BrowserWrapper` owns the chromiumoxide `Browser`, its CDP handler task
//! and the profile directory it was launched with.

use anyhow::Result;
use chromiumoxide::browser::Browser;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::browser_profile::{BrowserProfile, create_unique_profile};
use crate::browser_setup;

/// Wrapper for Browser and its event handler task
///
/// The handler is aborted on drop so it does not outlive the browser. The
/// profile directory is removed after that, when `profile` drops.
pub struct BrowserWrapper {
    browser: Browser,
    handler: JoinHandle<()>,
    headless: bool,
    profile: BrowserProfile,
}

impl BrowserWrapper {
    /// Launch a fresh browser with its own profile directory
    pub async fn launch(headless: bool, request_timeout: Duration) -> Result<Self> {
        let profile = create_unique_profile()?;
        let (browser, handler) =
            browser_setup::launch_browser(headless, profile.path(), request_timeout).await?;

        Ok(Self {
            browser,
            handler,
            headless,
            profile,
        })
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Check the CDP connection is still alive
    pub async fn is_healthy(&self) -> bool {
        match self.browser.version().await {
            Ok(_) => true,
            Err(e) => {
                warn!("Browser health check failed: {}", e);
                false
            }
        }
    }

    /// Close the browser process and wait for it to exit.
    ///
    /// Errors are logged, the process may already be gone.
    pub async fn close(mut self) {
        info!(
            headless = self.headless,
            profile = %self.profile.path().display(),
            "Closing browser"
        );
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser cleanly: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
    }
}

impl Drop for BrowserWrapper {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
