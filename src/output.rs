//! JSON and text rendering
//!
//! Renderers only read the in-memory types; nothing here re-derives dates,
//! ordering or dedup.

use chrono::Utc;
use serde::Serialize;
use std::fmt::Write as _;

use crate::aggregate::{AggregatedResultSet, SearchSummary};
use crate::content::{clean_text, extract_key_phrases, summarize_content};
use crate::dates::recency_score;
use crate::plan::SearchPlan;
use crate::utils::text::ellipsize;
use crate::web_search::{PageContent, SearchResult};

/// Snippet and content previews in text mode
const PREVIEW_CHARS: usize = 200;

const KEY_PHRASES: usize = 8;
const SUMMARY_SENTENCES: usize = 3;

/// Pretty JSON for any serializable value
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Numbered result list with date and recency when known
#[must_use]
pub fn render_results_text(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No search results found\n".to_string();
    }

    let now = Utc::now();
    let mut out = String::new();
    for (i, r) in results.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, r.title);
        let _ = writeln!(out, "   URL: {}", r.url);
        let _ = writeln!(out, "   Source: {}", r.source);
        if let Some(date) = r.published_date {
            let _ = writeln!(
                out,
                "   Date: {} (recency {:.2})",
                date.format("%Y-%m-%d"),
                recency_score(Some(date), now)
            );
        }
        if !r.snippet.is_empty() {
            let _ = writeln!(out, "   {}", ellipsize(&r.snippet, PREVIEW_CHARS));
        }
        if let Some(content) = &r.content {
            let _ = writeln!(out, "   Content: {}", ellipsize(content, PREVIEW_CHARS));
        }
        out.push('\n');
    }
    out
}

/// Results followed by the failure summary
#[must_use]
pub fn render_aggregated_text(set: &AggregatedResultSet) -> String {
    let mut out = render_results_text(&set.results);
    if !set.failures.is_empty() {
        let _ = writeln!(out, "Failed searches ({}):", set.failures.len());
        for f in &set.failures {
            let _ = writeln!(out, "  - '{}' on {}: {}", f.keyword, f.engine, f.error);
        }
    }
    out
}

#[must_use]
pub fn render_plan_text(plan: &SearchPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Search plan: {} ({})", plan.topic, plan.plan_type);
    let _ = writeln!(out, "Created: {}", plan.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Tasks: {}", plan.tasks.len());
    for (i, task) in plan.tasks.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. [{}] {} ({} results)",
            i + 1,
            task.engine,
            task.keyword,
            task.result_count
        );
    }
    out
}

#[must_use]
pub fn render_summary_text(summary: &SearchSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Topic: {}", summary.topic);
    let _ = writeln!(
        out,
        "Searches: {} total, {} succeeded, {} failed",
        summary.total_searches, summary.successful_searches, summary.failed_searches
    );
    let _ = writeln!(
        out,
        "Results: {} returned, {} unique, {} dated",
        summary.total_results, summary.unique_results, summary.results_with_dates
    );
    let sources: Vec<String> = summary
        .source_distribution
        .iter()
        .map(|(engine, n)| format!("{engine}={n}"))
        .collect();
    if !sources.is_empty() {
        let _ = writeln!(out, "Sources: {}", sources.join(", "));
    }
    let _ = writeln!(out, "Elapsed: {:.1}s", summary.elapsed.as_secs_f64());
    out
}

#[must_use]
pub fn render_content_text(content: &PageContent) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "URL: {}", content.url);
    if let Some(error) = &content.error {
        let _ = writeln!(out, "Error: {error}");
        return out;
    }
    let _ = writeln!(out, "Title: {}", content.title);
    if !content.description.is_empty() {
        let _ = writeln!(out, "Description: {}", content.description);
    }
    let _ = writeln!(out, "Language: {}", content.language);
    let _ = writeln!(out, "Words: {}", content.word_count);

    let phrases = extract_key_phrases(&content.text, KEY_PHRASES);
    if !phrases.is_empty() {
        let _ = writeln!(out, "Key phrases: {}", phrases.join(", "));
    }
    let summary = summarize_content(&clean_text(&content.text), SUMMARY_SENTENCES);
    if !summary.is_empty() {
        let _ = writeln!(out, "Summary: {summary}");
    }
    out.push('\n');
    out.push_str(&content.text);
    out.push('\n');
    out
}
