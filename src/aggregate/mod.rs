//! Merging outcomes into the final result set
//!
//! Runs strictly after every outcome is collected. Order of operations:
//! flatten (task order, then rank), drop repeated URLs keeping the first,
//! apply the recency window, then optionally sort by date.

mod summary;

pub use summary::{SearchSummary, summarize};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::coordinator::ExecutionOutcome;
use crate::dates::recency_cutoff;
use crate::error::TaskError;
use crate::plan::RecencyFilter;
use crate::web_search::{Engine, SearchResult};

/// One failed task in the failure summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFailure {
    pub keyword: String,
    pub engine: Engine,
    pub error: TaskError,
}

/// Deduplicated, filtered and ordered results plus the failures behind them
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AggregatedResultSet {
    pub results: Vec<SearchResult>,
    pub failures: Vec<TaskFailure>,
}

impl AggregatedResultSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Aggregate against the current time
#[must_use]
pub fn aggregate(
    outcomes: &[ExecutionOutcome],
    recency_filter: Option<RecencyFilter>,
    sort_by_date: bool,
) -> AggregatedResultSet {
    aggregate_at(outcomes, recency_filter, sort_by_date, Utc::now())
}

/// Aggregate with an explicit `now` for the recency window.
///
/// With a filter of `months`, a result is kept when its date lies at or
/// after `now - months * 30 days`. Undated results are dropped while a
/// filter is active and kept otherwise.
#[must_use]
pub fn aggregate_at(
    outcomes: &[ExecutionOutcome],
    recency_filter: Option<RecencyFilter>,
    sort_by_date: bool,
    now: DateTime<Utc>,
) -> AggregatedResultSet {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut results: Vec<SearchResult> = Vec::new();
    let mut duplicates = 0usize;

    for result in outcomes
        .iter()
        .filter(|o| o.is_success())
        .flat_map(|o| o.results.iter())
    {
        if seen.insert(result.url.as_str()) {
            results.push(result.clone());
        } else {
            duplicates += 1;
        }
    }

    let before_filter = results.len();
    if let Some(filter) = recency_filter {
        let cutoff = recency_cutoff(now, filter.months);
        results.retain(|r| r.published_date.is_some_and(|d| d >= cutoff));
    }

    if sort_by_date {
        sort_by_date_desc(&mut results);
    }

    let failures: Vec<TaskFailure> = outcomes
        .iter()
        .filter_map(|o| {
            o.error.as_ref().map(|error| TaskFailure {
                keyword: o.task.keyword.clone(),
                engine: o.task.engine,
                error: error.clone(),
            })
        })
        .collect();

    debug!(
        unique = before_filter,
        duplicates,
        kept = results.len(),
        failures = failures.len(),
        "Aggregated search results"
    );

    AggregatedResultSet { results, failures }
}

/// Stable sort: newest first, undated results last in their current order
pub fn sort_by_date_desc(results: &mut [SearchResult]) {
    // Option orders None before Some, so reversing puts undated last
    results.sort_by(|a, b| b.published_date.cmp(&a.published_date));
}
