use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use super::AggregatedResultSet;
use crate::coordinator::ExecutionReport;
use crate::plan::SearchPlan;
use crate::web_search::Engine;

/// Statistics over one executed plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSummary {
    pub topic: String,
    pub total_searches: usize,
    pub successful_searches: usize,
    pub failed_searches: usize,
    /// Results returned by all tasks before deduplication
    pub total_results: usize,
    /// Results left after aggregation
    pub unique_results: usize,
    pub results_with_dates: usize,
    /// Aggregated results per engine
    pub source_distribution: BTreeMap<Engine, usize>,
    pub keywords_used: Vec<String>,
    pub engines_used: Vec<Engine>,
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs_f64")]
    pub elapsed: Duration,
}

#[must_use]
pub fn summarize(
    plan: &SearchPlan,
    report: &ExecutionReport,
    aggregated: &AggregatedResultSet,
) -> SearchSummary {
    let mut source_distribution = BTreeMap::new();
    for result in &aggregated.results {
        *source_distribution.entry(result.source).or_insert(0) += 1;
    }

    SearchSummary {
        topic: plan.topic.clone(),
        total_searches: report.outcomes.len(),
        successful_searches: report.success_count,
        failed_searches: report.error_count,
        total_results: report.outcomes.iter().map(|o| o.results.len()).sum(),
        unique_results: aggregated.results.len(),
        results_with_dates: aggregated
            .results
            .iter()
            .filter(|r| r.published_date.is_some())
            .count(),
        source_distribution,
        keywords_used: plan.keywords().into_iter().map(str::to_string).collect(),
        engines_used: plan.engines(),
        elapsed: report.elapsed,
    }
}

fn as_secs_f64<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
