//! Full-page content extraction
//!
//! `extract_content` loads a URL in the shared browser, strips navigation
//! and ad noise, and returns the main text. It never fails outright: any
//! problem is reported in `PageContent::error` so one bad page cannot sink
//! a batch.

mod js_scripts;
pub mod text;

pub use text::{clean_lines, clean_text, extract_key_phrases, summarize_content};

use anyhow::{Context, Result, anyhow};
use futures::future::join_all;
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, info, warn};
use url::Url;

use crate::web_search::page_helpers::{PageGuard, with_page_timeout};
use crate::web_search::{BrowserManager, ExtractOptions, PageContent, SearchResult};

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    language: String,
    #[serde(default)]
    text: String,
}

fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).with_context(|| format!("Invalid URL '{url}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "Unsupported URL scheme '{}', only http and https can be extracted",
            parsed.scheme()
        ));
    }
    Ok(parsed)
}

/// Extract the main text of `url`
pub async fn extract_content(
    manager: &BrowserManager,
    url: &str,
    options: ExtractOptions,
) -> PageContent {
    info!(url, "Extracting content");

    match with_page_timeout(load_page(manager, url, options), options.timeout, "Extraction").await
    {
        Ok(content) => {
            debug!(url, words = content.word_count, "Content extracted");
            content
        }
        Err(e) => {
            warn!(url, "Failed to extract content: {:#}", e);
            PageContent::failed(url, format!("{e:#}"))
        }
    }
}

async fn load_page(
    manager: &BrowserManager,
    url: &str,
    options: ExtractOptions,
) -> Result<PageContent> {
    let target = validate_url(url)?;

    let wrapper = manager.get_or_launch(options.headless).await?;
    let page = PageGuard::new(
        wrapper
            .browser()
            .new_page("about:blank")
            .await
            .context("Failed to create blank page")?,
        format!("extract:{target}"),
    );

    page.goto(target.as_str())
        .await
        .with_context(|| format!("Failed to navigate to {target}"))?;

    let raw: RawPage = page
        .evaluate(js_scripts::EXTRACT_CONTENT_SCRIPT)
        .await
        .context("Failed to run content extraction script")?
        .into_value()
        .context("Unexpected content extraction output")?;

    let text = clean_lines(&raw.text);
    Ok(PageContent {
        url: url.to_string(),
        title: raw.title.trim().to_string(),
        description: raw.description.trim().to_string(),
        language: raw.language,
        word_count: text.split_whitespace().count(),
        text,
        error: None,
    })
}

/// New results with `content` filled for the first `limit` entries.
///
/// Pages are fetched concurrently. A failed extraction leaves `content`
/// unset. Results past `limit` are returned unchanged.
pub async fn enrich_with_content<F, Fut>(
    results: &[SearchResult],
    extractor: F,
    limit: usize,
) -> Vec<SearchResult>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = PageContent>,
{
    let split = limit.min(results.len());
    let (head, tail) = results.split_at(split);

    let pages = join_all(head.iter().map(|r| extractor(r.url.clone()))).await;

    head.iter()
        .zip(pages)
        .map(|(result, page)| {
            let content = page.is_ok().then_some(page.text);
            result.with_content(content)
        })
        .chain(tail.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web_search::Engine;

    #[test]
    fn only_http_urls_are_accepted() {
        assert!(validate_url("https://example.com/a").is_ok());
        assert!(validate_url("file:///etc/passwd").is_err());
        assert!(validate_url("not a url").is_err());
    }

    #[tokio::test]
    async fn enrichment_fills_only_the_first_results() {
        let results: Vec<SearchResult> = (1..=4)
            .map(|i| SearchResult::new(format!("T{i}"), format!("https://{i}.test/"), "", Engine::Google))
            .collect();

        let enriched = enrich_with_content(
            &results,
            |url| async move {
                if url.starts_with("https://2.") {
                    PageContent::failed(url, "boom")
                } else {
                    PageContent {
                        text: format!("body of {url}"),
                        url,
                        ..PageContent::default()
                    }
                }
            },
            3,
        )
        .await;

        assert_eq!(enriched.len(), 4);
        assert_eq!(enriched[0].content.as_deref(), Some("body of https://1.test/"));
        assert_eq!(enriched[1].content, None);
        assert!(enriched[2].content.is_some());
        assert_eq!(enriched[3].content, None);
        // inputs are untouched
        assert!(results.iter().all(|r| r.content.is_none()));
    }
}
