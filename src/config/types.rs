//! Default search settings
//!
//! `SearchDefaults` carries the values injected into every `SearchTask`
//! and the CLI's fallbacks. Precedence is command-line flag, then
//! environment (including `.env`), then the built-in constants.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::plan::{RecencyFilter, TaskOptions};
use crate::utils::{
    DEFAULT_MAX_CONCURRENT, DEFAULT_NUM_RESULTS, DEFAULT_PLAN_RESULTS_PER_SEARCH,
    DEFAULT_RECENT_MONTHS, DEFAULT_TIMEOUT_SECS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDefaults {
    /// Per-search timeout in seconds
    pub(crate) timeout_secs: u64,
    pub(crate) headless: bool,
    pub(crate) max_concurrent: usize,
    /// Results for a single `search` command
    pub(crate) num_results: usize,
    /// Results per task when running a plan
    pub(crate) plan_results_per_search: usize,
    pub(crate) recent_months: u32,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            headless: true,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            num_results: DEFAULT_NUM_RESULTS,
            plan_results_per_search: DEFAULT_PLAN_RESULTS_PER_SEARCH,
            recent_months: DEFAULT_RECENT_MONTHS,
        }
    }
}

impl SearchDefaults {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    #[must_use]
    pub fn num_results(&self) -> usize {
        self.num_results
    }

    #[must_use]
    pub fn plan_results_per_search(&self) -> usize {
        self.plan_results_per_search
    }

    #[must_use]
    pub fn recent_months(&self) -> u32 {
        self.recent_months
    }

    /// Task options built from these defaults
    #[must_use]
    pub fn task_options(&self, recency_filter: Option<RecencyFilter>) -> TaskOptions {
        TaskOptions {
            timeout: self.timeout(),
            headless: self.headless,
            recency_filter,
        }
    }
}
