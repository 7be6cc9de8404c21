//! Locating, downloading and launching Chromium

use anyhow::{Context, Result, anyhow};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use crate::utils::constants::CHROME_USER_AGENT;

/// Explicit executable override
pub const ENV_CHROMIUM_PATH: &str = "CHROMIUM_PATH";

#[cfg(target_os = "windows")]
const INSTALL_LOCATIONS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files\Chromium\Application\chrome.exe",
];

#[cfg(target_os = "macos")]
const INSTALL_LOCATIONS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "~/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/opt/homebrew/bin/chromium",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const INSTALL_LOCATIONS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    "/usr/local/bin/chromium",
    "/opt/google/chrome/chrome",
];

/// Binary names tried with `which`
const PATH_COMMANDS: &[&str] = &["chromium", "chromium-browser", "google-chrome", "chrome"];

/// Launch arguments passed to every browser
const BROWSER_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-blink-features=AutomationControlled",
    "--disable-dev-shm-usage",
    "--disable-extensions",
    "--disable-gpu",
    "--disable-web-security",
    "--allow-running-insecure-content",
    "--no-first-run",
    "--no-default-browser-check",
    "--mute-audio",
];

/// Locate an installed Chrome or Chromium.
///
/// Checks `CHROMIUM_PATH`, then the usual install locations for this
/// platform, then `which`. Returns `None` when nothing is found.
#[must_use]
pub fn find_browser_executable() -> Option<PathBuf> {
    from_env_override()
        .or_else(from_install_locations)
        .or_else(from_search_path)
}

fn from_env_override() -> Option<PathBuf> {
    let path = PathBuf::from(std::env::var_os(ENV_CHROMIUM_PATH)?);
    if path.exists() {
        info!(path = %path.display(), "Using browser from {ENV_CHROMIUM_PATH}");
        Some(path)
    } else {
        warn!(path = %path.display(), "{ENV_CHROMIUM_PATH} does not exist, ignoring it");
        None
    }
}

fn expand_home(location: &str) -> Option<PathBuf> {
    match location.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None => Some(PathBuf::from(location)),
    }
}

fn from_install_locations() -> Option<PathBuf> {
    let found = INSTALL_LOCATIONS
        .iter()
        .filter_map(|location| expand_home(location))
        .find(|path| path.exists())?;
    info!(path = %found.display(), "Found installed browser");
    Some(found)
}

fn from_search_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        return None;
    }
    PATH_COMMANDS.iter().find_map(|cmd| {
        let output = Command::new("which").arg(cmd).output().ok()?;
        if !output.status.success() {
            return None;
        }
        let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if found.is_empty() {
            return None;
        }
        info!(command = cmd, path = %found, "Found browser on PATH");
        Some(PathBuf::from(found))
    })
}

/// Directory holding the downloaded Chromium build
fn managed_browser_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let tmp = std::env::temp_dir();
        warn!(fallback = %tmp.display(), "No user cache directory, using temp dir");
        tmp
    });
    base.join("browser_search").join("chromium")
}

/// Download Chromium into the user cache directory and return its executable
pub async fn download_managed_browser() -> Result<PathBuf> {
    let target = managed_browser_dir();
    info!(dir = %target.display(), "No local browser found, downloading Chromium");

    tokio::fs::create_dir_all(&target)
        .await
        .with_context(|| format!("Failed to create {}", target.display()))?;

    let options = BrowserFetcherOptions::builder()
        .with_path(&target)
        .build()
        .context("Invalid browser fetcher options")?;
    let installed = BrowserFetcher::new(options)
        .fetch()
        .await
        .context("Chromium download failed")?;

    info!(dir = %installed.folder_path.display(), "Chromium ready");
    Ok(installed.executable_path)
}

/// chromiumoxide does not know every CDP event Chrome emits; those decode
/// failures are noise
fn is_benign_handler_error(message: &str) -> bool {
    message.contains("data did not match any variant of untagged enum Message")
        || message.contains("Failed to deserialize WS response")
}

/// Launch a browser using `user_data_dir` as its profile.
///
/// The returned handler task drives the CDP connection and must be aborted
/// once the browser is no longer used.
pub async fn launch_browser(
    headless: bool,
    user_data_dir: &Path,
    request_timeout: Duration,
) -> Result<(Browser, JoinHandle<()>)> {
    let executable = match find_browser_executable() {
        Some(path) => path,
        None => download_managed_browser().await?,
    };

    let mut builder = BrowserConfigBuilder::default()
        .chrome_executable(executable)
        .user_data_dir(user_data_dir)
        .request_timeout(request_timeout)
        .window_size(1920, 1080)
        .arg(format!("--user-agent={CHROME_USER_AGENT}"));
    builder = if headless {
        builder.headless_mode(HeadlessMode::default())
    } else {
        builder.with_head()
    };
    for arg in BROWSER_ARGS {
        builder = builder.arg(*arg);
    }
    let config = builder
        .build()
        .map_err(|e| anyhow!("Invalid browser config: {e}"))?;

    info!(headless, profile = %user_data_dir.display(), "Launching browser");
    let (browser, mut handler) = Browser::launch(config)
        .await
        .context("Browser launch failed")?;

    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            let Err(e) = event else { continue };
            let message = e.to_string();
            if is_benign_handler_error(&message) {
                trace!("Ignoring CDP decode error: {message}");
            } else {
                error!("CDP handler error: {e:?}");
            }
        }
        debug!("CDP handler stopped");
    });

    Ok((browser, handler_task))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managed_browser_lives_under_crate_cache_dir() {
        let dir = managed_browser_dir();
        assert!(dir.ends_with("browser_search/chromium"));
    }

    #[test]
    fn home_relative_locations_expand() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/bin/chrome"), Some(home.join("bin/chrome")));
        }
        assert_eq!(
            expand_home("/usr/bin/chromium"),
            Some(PathBuf::from("/usr/bin/chromium"))
        );
    }

    #[test]
    fn unknown_cdp_events_are_benign() {
        assert!(is_benign_handler_error(
            "data did not match any variant of untagged enum Message"
        ));
        assert!(!is_benign_handler_error("connection closed"));
    }
}
