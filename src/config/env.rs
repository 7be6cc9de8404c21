//! Environment overlay for `SearchDefaults`

use std::str::FromStr;
use tracing::debug;

use super::types::SearchDefaults;
use crate::error::SearchError;

pub const ENV_TIMEOUT: &str = "BROWSER_SEARCH_TIMEOUT";
pub const ENV_HEADLESS: &str = "BROWSER_SEARCH_HEADLESS";
pub const ENV_MAX_CONCURRENT: &str = "BROWSER_SEARCH_MAX_CONCURRENT";
pub const ENV_NUM_RESULTS: &str = "BROWSER_SEARCH_NUM_RESULTS";

impl SearchDefaults {
    /// Built-in defaults overlaid with the process environment.
    ///
    /// A `.env` file in the working directory (or a parent) is loaded first
    /// if present.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when a variable is set but unparseable or out
    /// of range.
    pub fn from_env() -> Result<Self, SearchError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values produced by `lookup` onto the built-in defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SearchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(v) = parse_var::<u64>(&lookup, ENV_TIMEOUT)? {
            builder = builder.timeout_secs(v);
        }
        if let Some(raw) = lookup(ENV_HEADLESS) {
            builder = builder.headless(parse_bool(ENV_HEADLESS, &raw)?);
        }
        if let Some(v) = parse_var::<usize>(&lookup, ENV_MAX_CONCURRENT)? {
            builder = builder.max_concurrent(v);
        }
        if let Some(v) = parse_var::<usize>(&lookup, ENV_NUM_RESULTS)? {
            builder = builder.num_results(v);
        }

        builder.build()
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, SearchError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            SearchError::InvalidConfiguration(format!("{key}='{raw}' is not valid: {e}"))
        }),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, SearchError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SearchError::InvalidConfiguration(format!(
            "{key}='{raw}' is not a boolean (use true/false)"
        ))),
    }
}
