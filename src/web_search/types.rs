//! Data structures shared by the engine adapters and the coordinator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SearchError;

// =============================================================================
// Engine identifiers
// =============================================================================

/// Supported search engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Google,
    Bing,
    #[serde(alias = "ddg")]
    DuckDuckGo,
}

impl Engine {
    /// Every engine, in the order used for `--engine all`
    pub const ALL: [Engine; 3] = [Engine::Google, Engine::Bing, Engine::DuckDuckGo];

    /// Canonical lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "bing" => Ok(Self::Bing),
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            other => Err(SearchError::InvalidConfiguration(format!(
                "Invalid search engine '{other}'. Supported engines: google, bing, duckduckgo (ddg)"
            ))),
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// A single search result as produced by an engine adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title
    pub title: String,

    /// Page URL, the dedup key within a result set
    pub url: String,

    /// Description snippet from the result page
    pub snippet: String,

    /// Engine that produced the result
    pub source: Engine,

    /// Rank within the engine's result page (1-indexed)
    #[serde(default)]
    pub position: usize,

    /// Publication date discovered in the snippet, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,

    /// Full-page text, only present after content enrichment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl SearchResult {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        source: Engine,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            source,
            position: 0,
            published_date: None,
            content: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_published_date(mut self, date: Option<DateTime<Utc>>) -> Self {
        self.published_date = date;
        self
    }

    /// Copy of this result carrying extracted page text
    #[must_use]
    pub fn with_content(&self, content: Option<String>) -> Self {
        Self {
            content,
            ..self.clone()
        }
    }
}

// =============================================================================
// Adapter request
// =============================================================================

/// Arguments handed to an engine's `search` capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: String,
    pub engine: Engine,
    pub num_results: usize,
    pub timeout: Duration,
    pub headless: bool,
}

/// Options for content extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub timeout: Duration,
    pub headless: bool,
}

/// Text extracted from a single page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub url: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub text: String,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageContent {
    /// Content record for a page that could not be extracted
    #[must_use]
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && !self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_parses_aliases_case_insensitively() {
        assert_eq!("DDG".parse::<Engine>().unwrap(), Engine::DuckDuckGo);
        assert_eq!(" Bing ".parse::<Engine>().unwrap(), Engine::Bing);
        assert!(matches!(
            "yahoo".parse::<Engine>(),
            Err(SearchError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn result_json_has_required_fields() {
        let r = SearchResult::new("T", "https://a.test/", "S", Engine::Google);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["source"], "google");
        assert_eq!(json["url"], "https://a.test/");
        assert!(json.get("published_date").is_none());
    }
}
