//! Chrome profile directories
//!
//! Every launched browser gets its own UUID-named profile so concurrent
//! headless and headed instances never fight over a SingletonLock.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Prefix of every profile directory created by this crate
pub const PROFILE_PREFIX: &str = "browser_search_chrome";

/// RAII wrapper for a Chrome profile directory
///
/// The directory is removed on drop.
#[derive(Debug)]
pub struct BrowserProfile {
    path: PathBuf,
}

impl BrowserProfile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BrowserProfile {
    fn drop(&mut self) {
        if self.path.exists() {
            info!("BrowserProfile cleanup: removing {}", self.path.display());
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!(
                    "Failed to cleanup profile directory {}: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

/// Create a unique Chrome profile directory under the system temp dir
pub fn create_unique_profile() -> Result<BrowserProfile> {
    let path = std::env::temp_dir().join(format!("{PROFILE_PREFIX}_{}", Uuid::new_v4()));

    debug!("Creating unique Chrome profile: {}", path.display());

    // create_dir fails if the directory already exists
    std::fs::create_dir(&path)
        .with_context(|| format!("Failed to create profile directory: {}", path.display()))?;

    Ok(BrowserProfile { path })
}
