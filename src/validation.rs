//! Input validation for user-facing parameters
//!
//! Every check returns `SearchError::InvalidConfiguration` on violation so
//! callers can fail before launching a browser.

use std::time::Duration;

use crate::error::SearchError;
use crate::utils::{
    MAX_MAX_CONCURRENT, MAX_NUM_RESULTS, MAX_QUERY_LENGTH, MAX_RECENT_MONTHS, MAX_TIMEOUT_SECS,
    MIN_TIMEOUT_SECS,
};

fn invalid(msg: impl Into<String>) -> SearchError {
    SearchError::InvalidConfiguration(msg.into())
}

/// Trimmed query, non-empty and at most [`MAX_QUERY_LENGTH`] characters
pub fn validate_query(query: &str) -> Result<&str, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(invalid("Query must not be empty"));
    }
    let len = query.chars().count();
    if len > MAX_QUERY_LENGTH {
        return Err(invalid(format!(
            "Query is {len} characters, maximum is {MAX_QUERY_LENGTH}"
        )));
    }
    Ok(query)
}

pub fn validate_num_results(n: usize) -> Result<usize, SearchError> {
    if (1..=MAX_NUM_RESULTS).contains(&n) {
        Ok(n)
    } else {
        Err(invalid(format!(
            "Number of results must be between 1 and {MAX_NUM_RESULTS}, got {n}"
        )))
    }
}

pub fn validate_months(months: u32) -> Result<u32, SearchError> {
    if (1..=MAX_RECENT_MONTHS).contains(&months) {
        Ok(months)
    } else {
        Err(invalid(format!(
            "Months must be between 1 and {MAX_RECENT_MONTHS}, got {months}"
        )))
    }
}

pub fn validate_timeout(timeout: Duration) -> Result<Duration, SearchError> {
    let secs = timeout.as_secs();
    if (MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&secs) {
        Ok(timeout)
    } else {
        Err(invalid(format!(
            "Timeout must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS} seconds, got {secs}"
        )))
    }
}

/// Command-line bound on parallel searches. The coordinator itself only
/// requires at least one.
pub fn validate_max_concurrent(n: usize) -> Result<usize, SearchError> {
    if (1..=MAX_MAX_CONCURRENT).contains(&n) {
        Ok(n)
    } else {
        Err(invalid(format!(
            "Max concurrent must be between 1 and {MAX_MAX_CONCURRENT}, got {n}"
        )))
    }
}

/// Trim keywords and drop blanks, failing when nothing is left
pub fn validate_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<Vec<String>, SearchError> {
    let cleaned: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    if cleaned.is_empty() {
        return Err(invalid("At least one non-empty keyword is required"));
    }
    for keyword in &cleaned {
        validate_query(keyword)?;
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_bounds() {
        assert_eq!(validate_query("  rust  ").unwrap(), "rust");
        assert!(validate_query("   ").is_err());
        assert!(validate_query(&"a".repeat(MAX_QUERY_LENGTH)).is_ok());
        assert!(validate_query(&"a".repeat(MAX_QUERY_LENGTH + 1)).is_err());
    }

    #[test]
    fn numeric_bounds() {
        assert!(validate_num_results(0).is_err());
        assert!(validate_num_results(50).is_ok());
        assert!(validate_num_results(51).is_err());
        assert!(validate_months(0).is_err());
        assert!(validate_months(24).is_ok());
        assert!(validate_timeout(Duration::from_secs(4)).is_err());
        assert!(validate_timeout(Duration::from_secs(120)).is_ok());
        assert!(validate_max_concurrent(16).is_err());
    }

    #[test]
    fn keywords_are_trimmed_and_blanks_dropped() {
        let kws = validate_keywords(&[" a ", "", "b"]).unwrap();
        assert_eq!(kws, vec!["a", "b"]);
        assert!(validate_keywords(&["  ", ""]).is_err());
    }
}
