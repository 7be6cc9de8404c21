pub mod aggregate;
pub mod browser_profile;
pub mod browser_setup;
pub mod config;
pub mod content;
pub mod coordinator;
pub mod dates;
pub mod error;
pub mod output;
pub mod plan;
pub mod utils;
pub mod validation;
pub mod web_search;

pub use aggregate::{
    AggregatedResultSet, SearchSummary, TaskFailure, aggregate, aggregate_at, summarize,
};
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::SearchDefaults;
pub use content::{enrich_with_content, extract_content};
pub use coordinator::{ExecutionOutcome, ExecutionReport, execute, execute_plan};
pub use dates::{extract_date_from_snippet, is_recent, recency_score};
pub use error::{SearchError, TaskError};
pub use plan::{
    PlanType, RecencyFilter, SearchPlan, SearchTask, TaskOptions, build_plan, parse_engines,
};
pub use web_search::{
    BrowserManager, Engine, EngineRegistry, ExtractOptions, PageContent, SearchFn,
    SearchRequest, SearchResult, search_with_manager,
};
