//! Fluent builder for `SearchDefaults`
//!
//! Every setter is optional; `build()` validates the final values against
//! the same bounds the CLI enforces.

use std::time::Duration;

use super::types::SearchDefaults;
use crate::error::SearchError;
use crate::validation;

#[derive(Debug, Clone, Default)]
pub struct SearchDefaultsBuilder {
    inner: SearchDefaults,
}

impl SearchDefaults {
    /// Builder starting from the built-in defaults
    #[must_use]
    pub fn builder() -> SearchDefaultsBuilder {
        SearchDefaultsBuilder::default()
    }

    /// Builder starting from these values
    #[must_use]
    pub fn to_builder(&self) -> SearchDefaultsBuilder {
        SearchDefaultsBuilder {
            inner: self.clone(),
        }
    }
}

impl SearchDefaultsBuilder {
    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.inner.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.inner.headless = headless;
        self
    }

    #[must_use]
    pub fn max_concurrent(mut self, n: usize) -> Self {
        self.inner.max_concurrent = n;
        self
    }

    #[must_use]
    pub fn num_results(mut self, n: usize) -> Self {
        self.inner.num_results = n;
        self
    }

    #[must_use]
    pub fn plan_results_per_search(mut self, n: usize) -> Self {
        self.inner.plan_results_per_search = n;
        self
    }

    #[must_use]
    pub fn recent_months(mut self, months: u32) -> Self {
        self.inner.recent_months = months;
        self
    }

    /// Validate and produce the defaults
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when any value is outside its accepted range.
    pub fn build(self) -> Result<SearchDefaults, SearchError> {
        let d = self.inner;
        validation::validate_timeout(Duration::from_secs(d.timeout_secs))?;
        validation::validate_max_concurrent(d.max_concurrent)?;
        validation::validate_num_results(d.num_results)?;
        validation::validate_num_results(d.plan_results_per_search)?;
        validation::validate_months(d.recent_months)?;
        Ok(d)
    }
}
