use browser_search::{extract_date_from_snippet, is_recent, recency_score};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap()
}

fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

#[test]
fn test_relative_english_phrases() {
    let cases = [
        ("Posted 3 days ago - Tokio 1.40 lands", TimeDelta::days(3)),
        ("1 day ago", TimeDelta::days(1)),
        ("5 hours ago · Reuters", TimeDelta::hours(5)),
        ("45 minutes ago", TimeDelta::minutes(45)),
        ("2 weeks ago", TimeDelta::weeks(2)),
        ("4 Months Ago", TimeDelta::days(120)),
        ("2 years ago", TimeDelta::days(730)),
    ];
    for (snippet, delta) in cases {
        assert_eq!(
            extract_date_from_snippet(snippet, now()),
            Some(now() - delta),
            "snippet: {snippet}"
        );
    }
}

#[test]
fn test_relative_japanese_phrases() {
    assert_eq!(
        extract_date_from_snippet("5日前 - 新しいリリース", now()),
        Some(now() - TimeDelta::days(5))
    );
    assert_eq!(
        extract_date_from_snippet("3時間前", now()),
        Some(now() - TimeDelta::hours(3))
    );
    assert_eq!(
        extract_date_from_snippet("2ヶ月前の記事", now()),
        Some(now() - TimeDelta::days(60))
    );
}

#[test]
fn test_absolute_dates() {
    let cases = [
        ("2024年5月1日 公開", midnight(2024, 5, 1)),
        ("Published 2024/05/01", midnight(2024, 5, 1)),
        ("2023-11-20 release notes", midnight(2023, 11, 20)),
        ("Updated 07/04/2024", midnight(2024, 7, 4)),
        ("12-25-2022 holiday post", midnight(2022, 12, 25)),
    ];
    for (snippet, expected) in cases {
        assert_eq!(
            extract_date_from_snippet(snippet, now()),
            Some(expected),
            "snippet: {snippet}"
        );
    }
}

#[test]
fn test_keywords() {
    assert_eq!(extract_date_from_snippet("Updated today", now()), Some(now()));
    assert_eq!(
        extract_date_from_snippet("Yesterday the team shipped", now()),
        Some(now() - TimeDelta::days(1))
    );
    assert_eq!(
        extract_date_from_snippet("昨日のニュース", now()),
        Some(now() - TimeDelta::days(1))
    );
    assert_eq!(
        extract_date_from_snippet("as announced last week", now()),
        Some(now() - TimeDelta::weeks(1))
    );
    assert_eq!(
        extract_date_from_snippet("先月の発表", now()),
        Some(now() - TimeDelta::days(30))
    );
}

#[test]
fn test_no_date() {
    assert_eq!(extract_date_from_snippet("", now()), None);
    assert_eq!(extract_date_from_snippet("   \n ", now()), None);
    assert_eq!(
        extract_date_from_snippet("The Rust Programming Language book", now()),
        None
    );
}

#[test]
fn test_relative_phrase_beats_absolute_date() {
    // Relative patterns come first in the table
    assert_eq!(
        extract_date_from_snippet("2 days ago · 2020-01-01 archive", now()),
        Some(now() - TimeDelta::days(2))
    );
}

#[test]
fn test_is_recent_boundary() {
    let boundary = now() - TimeDelta::days(90);
    assert!(is_recent(boundary, 3, now()));
    assert!(!is_recent(boundary - TimeDelta::seconds(1), 3, now()));
    assert!(is_recent(now() + TimeDelta::days(1), 3, now()));
}

#[test]
fn test_recency_score_is_monotonic() {
    assert_eq!(recency_score(None, now()), 0.0);
    assert_eq!(recency_score(Some(now()), now()), 1.0);
    assert_eq!(recency_score(Some(now() + TimeDelta::days(3)), now()), 1.0);

    let mut previous = 1.0;
    for days in 0..1500 {
        let score = recency_score(Some(now() - TimeDelta::days(days)), now());
        assert!(score <= previous, "score rose at {days} days");
        assert!((0.1..=1.0).contains(&score), "score {score} at {days} days");
        previous = score;
    }
}
