use serde::Serialize;
use std::time::Duration;

use crate::error::TaskError;
use crate::plan::SearchTask;
use crate::web_search::SearchResult;

/// Result of running one `SearchTask`
///
/// `error` is `None` exactly when the adapter returned results (possibly
/// none). A failed task always has empty `results`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionOutcome {
    pub task: SearchTask,
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TaskError>,
}

impl ExecutionOutcome {
    #[must_use]
    pub fn success(task: SearchTask, results: Vec<SearchResult>) -> Self {
        Self {
            task,
            results,
            error: None,
        }
    }

    #[must_use]
    pub fn failure(task: SearchTask, error: TaskError) -> Self {
        Self {
            task,
            results: Vec::new(),
            error: Some(error),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of a whole plan plus timing
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    pub outcomes: Vec<ExecutionOutcome>,
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs_f64")]
    pub elapsed: Duration,
    pub success_count: usize,
    pub error_count: usize,
}

impl ExecutionReport {
    #[must_use]
    pub fn new(outcomes: Vec<ExecutionOutcome>, elapsed: Duration) -> Self {
        let success_count = outcomes.iter().filter(|o| o.is_success()).count();
        let error_count = outcomes.len() - success_count;
        Self {
            outcomes,
            elapsed,
            success_count,
            error_count,
        }
    }
}

fn as_secs_f64<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}
