//! Per-engine search pages
//!
//! Each engine is described by an [`EngineProfile`]: how to build its result
//! URL, what to wait for, and a script that scrapes the rendered page into
//! raw `{title, url, snippet}` records. Everything after the scrape (URL
//! cleanup, ranking, date discovery) is shared.

mod bing;
mod duckduckgo;
mod google;

use anyhow::{Context, Result};
use chromiumoxide::browser::Browser;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::page_helpers::{PageGuard, wait_for_any_selector, with_page_timeout};
use super::types::{Engine, SearchRequest, SearchResult};
use crate::dates::extract_date_from_snippet;

/// Upper bound on waiting for result markup after navigation
const RESULTS_WAIT: Duration = Duration::from_secs(10);

/// Static description of one engine's result page
#[derive(Clone, Copy)]
pub(crate) struct EngineProfile {
    pub name: &'static str,
    pub search_url: fn(&str) -> Result<Url>,
    /// Any of these appearing means results have rendered
    pub ready_selectors: &'static [&'static str],
    /// Evaluates to an array of [`RawResult`]
    pub scrape_script: &'static str,
    /// Turn a scraped href into the result URL, `None` to skip it
    pub resolve_href: fn(&str) -> Option<String>,
}

pub(crate) const fn profile(engine: Engine) -> &'static EngineProfile {
    match engine {
        Engine::Google => &google::PROFILE,
        Engine::Bing => &bing::PROFILE,
        Engine::DuckDuckGo => &duckduckgo::PROFILE,
    }
}

/// Keep only absolute http(s) links
fn absolute_only(href: &str) -> Option<String> {
    match Url::parse(href) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(href.to_string()),
        _ => None,
    }
}

/// Record produced by an engine's scrape script
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub snippet: String,
}

/// Convert scraped records into ranked results.
///
/// Records without a title or a usable URL are skipped and do not consume a
/// rank. At most `limit` results are returned.
pub(crate) fn into_results(
    raw: Vec<RawResult>,
    engine: Engine,
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<SearchResult> {
    let profile = profile(engine);

    raw.into_iter()
        .filter_map(|r| {
            let title = r.title.trim();
            if title.is_empty() {
                return None;
            }
            let url = (profile.resolve_href)(r.url.trim())?;
            let snippet = r.snippet.trim();
            let date = extract_date_from_snippet(snippet, now);
            Some(SearchResult::new(title, url, snippet, engine).with_published_date(date))
        })
        .take(limit)
        .enumerate()
        .map(|(i, r)| r.with_position(i + 1))
        .collect()
}

/// Run one search on a fresh page of `browser`, navigating within `budget`
pub(crate) async fn search_page(
    browser: &Browser,
    request: &SearchRequest,
    budget: Duration,
) -> Result<Vec<SearchResult>> {
    let profile = profile(request.engine);
    let url = (profile.search_url)(&request.keyword)?;

    let page = PageGuard::new(
        browser
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")?,
        format!("{}:{}", request.engine, request.keyword),
    );

    info!(engine = %request.engine, keyword = %request.keyword, "Navigating to {}", url);
    with_page_timeout(
        async {
            page.goto(url.as_str())
                .await
                .with_context(|| format!("Failed to navigate to {}", profile.name))?;
            Ok(())
        },
        budget,
        "Navigation",
    )
    .await?;

    wait_for_any_selector(&page, profile.ready_selectors, RESULTS_WAIT.min(budget))
        .await
        .with_context(|| format!("{} results did not render", profile.name))?;

    let raw: Vec<RawResult> = page
        .evaluate(profile.scrape_script)
        .await
        .with_context(|| format!("Failed to run {} scrape script", profile.name))?
        .into_value()
        .with_context(|| format!("Unexpected {} scrape output", profile.name))?;

    debug!(engine = %request.engine, raw = raw.len(), "Scraped result records");

    Ok(into_results(raw, request.engine, request.num_results, Utc::now()))
}
