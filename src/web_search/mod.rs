//! Web search through browser automation
//!
//! Runs Google, Bing and DuckDuckGo searches in shared Chromium browsers
//! and returns structured results with titles, URLs, snippets and any
//! publication date found in the snippet.

pub(crate) mod browser;
pub(crate) mod engines;
pub mod manager;
pub(crate) mod page_helpers;
pub mod registry;
pub(crate) mod retry;
pub mod types;

pub use manager::BrowserManager;
pub use registry::{EngineRegistry, SearchFn, SearchFuture};
pub use types::{Engine, ExtractOptions, PageContent, SearchRequest, SearchResult};

use tracing::info;

use crate::error::SearchError;
use crate::utils::MAX_RETRIES;
use crate::validation;

/// Perform one search using the manager's shared browser
///
/// The browser for `request.headless` is launched on first use; call
/// [`BrowserManager::warm_up`] beforehand to keep that launch out of
/// `request.timeout`. Each attempt runs on a fresh page which is closed on
/// every exit path. Transient failures are retried with backoff while the
/// timeout allows.
///
/// # Example
/// ```no_run
/// use browser_search::web_search::{BrowserManager, Engine, SearchRequest, search_with_manager};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let manager = BrowserManager::new();
///     let request = SearchRequest {
///         keyword: "rust async programming".into(),
///         engine: Engine::DuckDuckGo,
///         num_results: 5,
///         timeout: Duration::from_secs(30),
///         headless: true,
///     };
///     let results = search_with_manager(&manager, request).await?;
///     println!("Found {} results", results.len());
///     manager.shutdown().await?;
///     Ok(())
/// }
/// ```
pub async fn search_with_manager(
    manager: &BrowserManager,
    request: SearchRequest,
) -> Result<Vec<SearchResult>, SearchError> {
    let keyword = validation::validate_query(&request.keyword)?.to_string();
    let request = SearchRequest { keyword, ..request };

    info!(
        engine = %request.engine,
        keyword = %request.keyword,
        num_results = request.num_results,
        "Starting search"
    );

    let wrapper = manager
        .get_or_launch(request.headless)
        .await
        .map_err(|e| SearchError::Browser(format!("{e:#}")))?;

    // Attempts share the request timeout so a retry still fits inside it
    let results = retry::retry_within(request.timeout, MAX_RETRIES, |budget| {
        engines::search_page(wrapper.browser(), &request, budget)
    })
    .await?;

    info!(
        engine = %request.engine,
        keyword = %request.keyword,
        "Search completed with {} results",
        results.len()
    );

    Ok(results)
}
