//! Search plan builder
//!
//! Turns a topic into an ordered list of (keyword, engine) tasks. Keywords
//! come either from the caller or from the per-type template table; tasks
//! are laid out keyword-major so the first keyword runs on every engine
//! before the second one starts.

mod templates;
pub mod types;

pub use types::{PlanType, RecencyFilter, SearchPlan, SearchTask, TaskOptions};

use chrono::Utc;
use tracing::debug;

use crate::error::SearchError;
use crate::validation;
use crate::web_search::types::Engine;

/// Build a search plan.
///
/// # Errors
///
/// - `InvalidPlanType` if `plan_type` is not a known plan type
/// - `InvalidConfiguration` for a blank topic, an empty engine list, override
///   keywords that are all blank, any keyword over the query length limit,
///   or an out-of-range `result_count`
pub fn build_plan(
    topic: &str,
    plan_type: &str,
    override_keywords: Option<&[String]>,
    engines: &[Engine],
    options: &TaskOptions,
    result_count: usize,
) -> Result<SearchPlan, SearchError> {
    let plan_type: PlanType = plan_type.parse()?;
    let topic = validation::validate_query(topic)?;
    let result_count = validation::validate_num_results(result_count)?;

    let engines = dedup_engines(engines);
    if engines.is_empty() {
        return Err(SearchError::InvalidConfiguration(
            "At least one search engine is required".to_string(),
        ));
    }

    // Template expansion can push a long topic past the query limit
    let keywords = match override_keywords {
        Some(kws) => validation::validate_keywords(kws)?,
        None => {
            let expanded = templates::keywords_for(plan_type, topic);
            validation::validate_keywords(expanded.as_slice())?
        }
    };

    let tasks: Vec<SearchTask> = keywords
        .iter()
        .flat_map(|keyword| {
            engines.iter().map(move |&engine| SearchTask {
                keyword: keyword.clone(),
                engine,
                result_count,
                options: *options,
            })
        })
        .collect();

    debug!(
        topic,
        plan_type = %plan_type,
        keywords = keywords.len(),
        engines = engines.len(),
        tasks = tasks.len(),
        "Built search plan"
    );

    Ok(SearchPlan {
        topic: topic.to_string(),
        plan_type,
        tasks,
        created_at: Utc::now(),
    })
}

/// Parse a comma-separated engine list such as `google,ddg` or `all`.
///
/// Duplicates collapse to their first occurrence.
pub fn parse_engines(list: &str) -> Result<Vec<Engine>, SearchError> {
    let mut engines = Vec::new();
    for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if name.eq_ignore_ascii_case("all") {
            engines.extend(Engine::ALL);
        } else {
            engines.push(name.parse()?);
        }
    }
    let engines = dedup_engines(&engines);
    if engines.is_empty() {
        return Err(SearchError::InvalidConfiguration(
            "At least one search engine is required".to_string(),
        ));
    }
    Ok(engines)
}

fn dedup_engines(engines: &[Engine]) -> Vec<Engine> {
    let mut out: Vec<Engine> = Vec::with_capacity(engines.len());
    for &engine in engines {
        if !out.contains(&engine) {
            out.push(engine);
        }
    }
    out
}
