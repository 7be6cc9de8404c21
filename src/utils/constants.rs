//! Shared configuration constants for browser_search
//!
//! Default values and bounds used by the config layer, validation and the
//! engine adapters.

/// Default per-search timeout: 30 seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Smallest accepted per-search timeout
pub const MIN_TIMEOUT_SECS: u64 = 5;

/// Largest accepted per-search timeout
pub const MAX_TIMEOUT_SECS: u64 = 120;

/// Results requested from an engine when nothing else is configured
pub const DEFAULT_NUM_RESULTS: usize = 10;

/// Upper bound on results requested per search
pub const MAX_NUM_RESULTS: usize = 50;

/// Results requested per task when running a plan
pub const DEFAULT_PLAN_RESULTS_PER_SEARCH: usize = 5;

/// Months considered "recent" when the recency filter is on
pub const DEFAULT_RECENT_MONTHS: u32 = 3;

/// Upper bound for the recency window
pub const MAX_RECENT_MONTHS: u32 = 24;

/// Days counted per month by the recency filter
pub const DAYS_PER_MONTH: i64 = 30;

/// Default number of searches in flight for a plan
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Upper bound on searches in flight accepted from the command line
pub const MAX_MAX_CONCURRENT: usize = 15;

/// Longest accepted query, in characters
pub const MAX_QUERY_LENGTH: usize = 1000;

/// Number of keywords a generated plan may contain
pub const MAX_PLAN_KEYWORDS: usize = 8;

/// Retry attempts for transient engine failures
pub const MAX_RETRIES: u32 = 2;

/// Extracted page text is truncated to this many characters
pub const MAX_CONTENT_LENGTH: usize = 3000;

/// Extracted page text keeps at most this many lines
pub const MAX_CONTENT_LINES: usize = 200;

/// Lines of this length or shorter are treated as navigation noise
pub const MIN_CONTENT_LINE_LENGTH: usize = 10;

/// Results per task that get full-page content when extraction is on
pub const CONTENT_EXTRACTION_LIMIT: usize = 3;

/// Chrome user agent presented by launched browsers
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
