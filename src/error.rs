//! Error types for planning, execution and browser operations
//!
//! `SearchError` is what public operations return. `TaskError` is the
//! per-task failure descriptor recorded inside an `ExecutionOutcome`; it never
//! crosses a task boundary as an `Err`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Error types for search operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Plan type string did not name a known plan type
    #[error("Invalid plan type '{0}'. Valid types: comprehensive, technology, research, news, comparison, tutorial")]
    InvalidPlanType(String),

    /// A precondition on configuration or input was violated
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A single search exceeded its deadline
    #[error("Search timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The engine adapter failed to fetch or parse results
    #[error("Engine failure: {0}")]
    EngineFailure(String),

    /// Browser could not be launched or controlled
    #[error("Browser error: {0}")]
    Browser(String),
}

impl From<anyhow::Error> for SearchError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain
        Self::EngineFailure(format!("{err:#}"))
    }
}

/// Failure descriptor captured in an `ExecutionOutcome`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "details", rename_all = "snake_case")]
pub enum TaskError {
    /// The task exceeded `SearchTask::options.timeout`
    Timeout {
        #[serde(with = "duration_secs")]
        after: Duration,
    },
    /// The engine adapter returned an error (or was missing, or panicked)
    EngineFailure(String),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { after } => write!(f, "Timeout after {}s", after.as_secs()),
            Self::EngineFailure(details) => write!(f, "EngineFailure: {details}"),
        }
    }
}

impl From<SearchError> for TaskError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Timeout(after) => Self::Timeout { after },
            SearchError::EngineFailure(details) => Self::EngineFailure(details),
            other => Self::EngineFailure(other.to_string()),
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
