//! Publication-date discovery in result snippets
//!
//! Engines rarely expose a structured date, but snippets often start with
//! "3 days ago", "2024-05-01" or "2024年5月1日". The first pattern in
//! [`DATE_PATTERNS`] order that yields a valid date wins.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::utils::DAYS_PER_MONTH;

/// How a matched pattern converts to a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateKind {
    DaysAgo,
    HoursAgo,
    MinutesAgo,
    WeeksAgo,
    MonthsAgo,
    YearsAgo,
    /// Groups are year, month, day
    Absolute,
    /// Groups are month, day, year
    AbsoluteUs,
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
}

static DATE_PATTERNS: Lazy<Vec<(Regex, DateKind)>> = Lazy::new(|| {
    let table: &[(&str, DateKind)] = &[
        (r"(\d+)\s*日前", DateKind::DaysAgo),
        (r"(\d+)\s*時間前", DateKind::HoursAgo),
        (r"(\d+)\s*分前", DateKind::MinutesAgo),
        (r"(\d+)\s*週間前", DateKind::WeeksAgo),
        (r"(\d+)\s*ヶ月前", DateKind::MonthsAgo),
        (r"(\d+)\s*年前", DateKind::YearsAgo),
        (r"(\d+)\s*days?\s*ago", DateKind::DaysAgo),
        (r"(\d+)\s*hours?\s*ago", DateKind::HoursAgo),
        (r"(\d+)\s*minutes?\s*ago", DateKind::MinutesAgo),
        (r"(\d+)\s*weeks?\s*ago", DateKind::WeeksAgo),
        (r"(\d+)\s*months?\s*ago", DateKind::MonthsAgo),
        (r"(\d+)\s*years?\s*ago", DateKind::YearsAgo),
        (r"(\d{4})年(\d{1,2})月(\d{1,2})日", DateKind::Absolute),
        (r"(\d{4})/(\d{1,2})/(\d{1,2})", DateKind::Absolute),
        (r"(\d{4})-(\d{1,2})-(\d{1,2})", DateKind::Absolute),
        (r"(\d{1,2})/(\d{1,2})/(\d{4})", DateKind::AbsoluteUs),
        (r"(\d{1,2})-(\d{1,2})-(\d{4})", DateKind::AbsoluteUs),
        (r"今日|today", DateKind::Today),
        (r"昨日|yesterday", DateKind::Yesterday),
        (r"一週間前|last week", DateKind::LastWeek),
        (r"先月|last month", DateKind::LastMonth),
    ];

    table
        .iter()
        .filter_map(|(pattern, kind)| match Regex::new(&format!("(?i){pattern}")) {
            Ok(re) => Some((re, *kind)),
            Err(e) => {
                tracing::error!("Invalid date pattern '{pattern}': {e}");
                None
            }
        })
        .collect()
});

/// Extract a publication date from snippet text.
///
/// Relative expressions are resolved against `now`. Returns `None` when no
/// pattern yields a valid date.
#[must_use]
pub fn extract_date_from_snippet(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if text.trim().is_empty() {
        return None;
    }

    let text = text.replace('\n', " ");
    let text = text.trim();

    for (re, kind) in DATE_PATTERNS.iter() {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        match convert(&caps, *kind, now) {
            Some(date) => {
                debug!(
                    date = %date,
                    "Extracted date from snippet: {}",
                    crate::utils::truncate_chars(text, 100)
                );
                return Some(date);
            }
            None => {
                trace!("Date match '{}' did not convert, trying next pattern", &caps[0]);
            }
        }
    }

    None
}

fn convert(caps: &Captures<'_>, kind: DateKind, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i64>().ok());

    let ago = |delta: Option<TimeDelta>| delta.and_then(|d| now.checked_sub_signed(d));

    match kind {
        DateKind::DaysAgo => ago(num(1).and_then(TimeDelta::try_days)),
        DateKind::HoursAgo => ago(num(1).and_then(TimeDelta::try_hours)),
        DateKind::MinutesAgo => ago(num(1).and_then(TimeDelta::try_minutes)),
        DateKind::WeeksAgo => ago(num(1).and_then(TimeDelta::try_weeks)),
        DateKind::MonthsAgo => ago(num(1)
            .and_then(|n| n.checked_mul(DAYS_PER_MONTH))
            .and_then(TimeDelta::try_days)),
        DateKind::YearsAgo => ago(num(1)
            .and_then(|n| n.checked_mul(365))
            .and_then(TimeDelta::try_days)),
        DateKind::Absolute => ymd(num(1)?, num(2)?, num(3)?),
        DateKind::AbsoluteUs => ymd(num(3)?, num(1)?, num(2)?),
        DateKind::Today => Some(now),
        DateKind::Yesterday => ago(TimeDelta::try_days(1)),
        DateKind::LastWeek => ago(TimeDelta::try_weeks(1)),
        DateKind::LastMonth => ago(TimeDelta::try_days(DAYS_PER_MONTH)),
    }
}

fn ymd(year: i64, month: i64, day: i64) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Oldest instant still considered recent for a window of `months`.
///
/// A month counts as 30 days. The boundary itself is recent.
#[must_use]
pub fn recency_cutoff(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(months) * DAYS_PER_MONTH)
        .and_then(|d| now.checked_sub_signed(d))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Whether `date` falls inside the last `months` months (boundary inclusive)
#[must_use]
pub fn is_recent(date: DateTime<Utc>, months: u32, now: DateTime<Utc>) -> bool {
    date >= recency_cutoff(now, months)
}

/// Recency score in `0.0..=1.0`, where 1.0 is within the last week.
///
/// Undated results score 0. Future dates are treated as today.
#[must_use]
pub fn recency_score(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(date) = date else {
        return 0.0;
    };

    let days_ago = (now - date).num_days();
    let d = days_ago as f64;

    if days_ago <= 7 {
        1.0
    } else if days_ago <= 30 {
        0.9 - (d - 7.0) * 0.1 / 23.0
    } else if days_ago <= 90 {
        0.8 - (d - 30.0) * 0.3 / 60.0
    } else if days_ago <= 365 {
        0.5 - (d - 90.0) * 0.3 / 275.0
    } else {
        (0.2 - (d - 365.0) * 0.1 / 365.0).max(0.1)
    }
}
