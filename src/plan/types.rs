//! Plan, task and option types
//!
//! A `SearchPlan` is built once by [`super::build_plan`] and then consumed by
//! the coordinator. Nothing in here is mutated after construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SearchError;
use crate::utils::DEFAULT_TIMEOUT_SECS;
use crate::web_search::types::{Engine, SearchRequest};

/// Kind of plan, selects the keyword template set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Comprehensive,
    Technology,
    Research,
    News,
    Comparison,
    Tutorial,
}

impl PlanType {
    pub const ALL: [PlanType; 6] = [
        PlanType::Comprehensive,
        PlanType::Technology,
        PlanType::Research,
        PlanType::News,
        PlanType::Comparison,
        PlanType::Tutorial,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comprehensive => "comprehensive",
            Self::Technology => "technology",
            Self::Research => "research",
            Self::News => "news",
            Self::Comparison => "comparison",
            Self::Tutorial => "tutorial",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| SearchError::InvalidPlanType(s.to_string()))
    }
}

/// Keep only results published within the last `months` months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyFilter {
    pub months: u32,
}

impl RecencyFilter {
    #[must_use]
    pub const fn months(months: u32) -> Self {
        Self { months }
    }
}

/// Per-task execution options, injected from config defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOptions {
    #[serde(with = "secs")]
    pub timeout: Duration,
    pub headless: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recency_filter: Option<RecencyFilter>,
}

impl Default for TaskOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headless: true,
            recency_filter: None,
        }
    }
}

/// One (keyword, engine) search in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTask {
    pub keyword: String,
    pub engine: Engine,
    pub result_count: usize,
    pub options: TaskOptions,
}

impl SearchTask {
    /// Adapter arguments for this task
    #[must_use]
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            keyword: self.keyword.clone(),
            engine: self.engine,
            num_results: self.result_count,
            timeout: self.options.timeout,
            headless: self.options.headless,
        }
    }
}

/// Ordered set of search tasks derived from a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPlan {
    pub topic: String,
    pub plan_type: PlanType,
    pub tasks: Vec<SearchTask>,
    pub created_at: DateTime<Utc>,
}

impl SearchPlan {
    /// Distinct keywords in first-seen order
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for task in &self.tasks {
            if !seen.contains(&task.keyword.as_str()) {
                seen.push(task.keyword.as_str());
            }
        }
        seen
    }

    /// Distinct engines in first-seen order
    #[must_use]
    pub fn engines(&self) -> Vec<Engine> {
        let mut seen = Vec::new();
        for task in &self.tasks {
            if !seen.contains(&task.engine) {
                seen.push(task.engine);
            }
        }
        seen
    }
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
