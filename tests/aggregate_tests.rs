use browser_search::{
    AggregatedResultSet, Engine, ExecutionOutcome, ExecutionReport, RecencyFilter, SearchResult,
    SearchTask, TaskError, TaskOptions, aggregate, aggregate_at, build_plan, summarize,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn task(keyword: &str, engine: Engine) -> SearchTask {
    SearchTask {
        keyword: keyword.to_string(),
        engine,
        result_count: 5,
        options: TaskOptions::default(),
    }
}

fn result(url: &str, engine: Engine, date: Option<DateTime<Utc>>) -> SearchResult {
    SearchResult::new(format!("title {url}"), url, format!("snippet from {engine}"), engine)
        .with_published_date(date)
}

fn urls(set: &AggregatedResultSet) -> Vec<&str> {
    set.results.iter().map(|r| r.url.as_str()).collect()
}

#[test]
fn test_duplicate_url_keeps_first_task_in_order() {
    let outcomes = vec![
        ExecutionOutcome::success(
            task("rust", Engine::Google),
            vec![result("https://example.com/a", Engine::Google, None)],
        ),
        ExecutionOutcome::success(
            task("rust", Engine::Bing),
            vec![
                result("https://example.com/a", Engine::Bing, None),
                result("https://example.com/b", Engine::Bing, None),
            ],
        ),
    ];

    let set = aggregate(&outcomes, None, false);

    assert_eq!(urls(&set), vec!["https://example.com/a", "https://example.com/b"]);
    assert_eq!(set.results[0].source, Engine::Google);
    assert_eq!(set.results[0].snippet, "snippet from google");
    assert!(set.failures.is_empty());
}

#[test]
fn test_recency_boundary_is_inclusive() {
    let boundary = now() - TimeDelta::days(90);
    let outside = boundary - TimeDelta::days(1);
    let future = now() + TimeDelta::days(2);

    let outcomes = vec![ExecutionOutcome::success(
        task("rust", Engine::Google),
        vec![
            result("https://a.test/boundary", Engine::Google, Some(boundary)),
            result("https://a.test/outside", Engine::Google, Some(outside)),
            result("https://a.test/undated", Engine::Google, None),
            result("https://a.test/future", Engine::Google, Some(future)),
        ],
    )];

    let filtered = aggregate_at(&outcomes, Some(RecencyFilter::months(3)), false, now());
    assert_eq!(urls(&filtered), vec!["https://a.test/boundary", "https://a.test/future"]);

    let unfiltered = aggregate_at(&outcomes, None, false, now());
    assert_eq!(unfiltered.results.len(), 4);
}

#[test]
fn test_sort_by_date_puts_undated_last() {
    let d2024 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let d2023 = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();

    let outcomes = vec![ExecutionOutcome::success(
        task("rust", Engine::DuckDuckGo),
        vec![
            result("https://x.test/undated", Engine::DuckDuckGo, None),
            result("https://x.test/2023", Engine::DuckDuckGo, Some(d2023)),
            result("https://x.test/2024", Engine::DuckDuckGo, Some(d2024)),
        ],
    )];

    let set = aggregate(&outcomes, None, true);
    assert_eq!(
        urls(&set),
        vec!["https://x.test/2024", "https://x.test/2023", "https://x.test/undated"]
    );
}

#[test]
fn test_failures_are_listed_in_task_order() {
    let outcomes = vec![
        ExecutionOutcome::failure(
            task("alpha", Engine::Bing),
            TaskError::EngineFailure("blocked".to_string()),
        ),
        ExecutionOutcome::success(
            task("alpha", Engine::Google),
            vec![result("https://g.test/1", Engine::Google, None)],
        ),
        ExecutionOutcome::failure(
            task("beta", Engine::Google),
            TaskError::Timeout {
                after: Duration::from_secs(30),
            },
        ),
    ];

    let set = aggregate(&outcomes, None, false);

    assert_eq!(set.results.len(), 1);
    assert_eq!(set.failures.len(), 2);
    assert_eq!(set.failures[0].keyword, "alpha");
    assert_eq!(set.failures[0].engine, Engine::Bing);
    assert_eq!(set.failures[1].keyword, "beta");
    assert!(matches!(set.failures[1].error, TaskError::Timeout { .. }));
}

#[test]
fn test_aggregate_is_idempotent() {
    let d = now() - TimeDelta::days(10);
    let outcomes = vec![
        ExecutionOutcome::success(
            task("rust", Engine::Google),
            vec![
                result("https://a.test/1", Engine::Google, Some(d)),
                result("https://a.test/2", Engine::Google, None),
            ],
        ),
        ExecutionOutcome::success(
            task("rust", Engine::Bing),
            vec![result("https://a.test/1", Engine::Bing, None)],
        ),
    ];

    let filter = Some(RecencyFilter::months(1));
    let first = aggregate_at(&outcomes, filter, true, now());
    let second = aggregate_at(&outcomes, filter, true, now());
    assert_eq!(first, second);
}

#[test]
fn test_summary_counts() {
    let keywords = vec!["rust".to_string()];
    let plan = build_plan(
        "rust",
        "technology",
        Some(keywords.as_slice()),
        &[Engine::Google, Engine::Bing, Engine::DuckDuckGo],
        &TaskOptions::default(),
        5,
    )
    .unwrap();

    let dated = Some(now());
    let outcomes = vec![
        ExecutionOutcome::success(
            plan.tasks[0].clone(),
            vec![
                result("https://s.test/1", Engine::Google, dated),
                result("https://s.test/2", Engine::Google, None),
            ],
        ),
        ExecutionOutcome::success(
            plan.tasks[1].clone(),
            vec![result("https://s.test/1", Engine::Bing, None)],
        ),
        ExecutionOutcome::failure(
            plan.tasks[2].clone(),
            TaskError::EngineFailure("captcha".to_string()),
        ),
    ];
    let report = ExecutionReport::new(outcomes, Duration::from_secs(3));
    let set = aggregate(&report.outcomes, None, false);
    let summary = summarize(&plan, &report, &set);

    assert_eq!(summary.total_searches, 3);
    assert_eq!(summary.successful_searches, 2);
    assert_eq!(summary.failed_searches, 1);
    assert_eq!(summary.total_results, 3);
    assert_eq!(summary.unique_results, 2);
    assert_eq!(summary.results_with_dates, 1);
    assert_eq!(summary.source_distribution.get(&Engine::Google), Some(&2));
    assert_eq!(summary.source_distribution.get(&Engine::Bing), None);
    assert_eq!(summary.keywords_used, vec!["rust".to_string()]);
}

fn arb_engine() -> impl Strategy<Value = Engine> {
    prop_oneof![
        Just(Engine::Google),
        Just(Engine::Bing),
        Just(Engine::DuckDuckGo)
    ]
}

fn arb_outcome() -> impl Strategy<Value = ExecutionOutcome> {
    let results = prop::collection::vec(
        (0u8..12, arb_engine(), prop::option::of(0i64..400)),
        0..8,
    );
    (arb_engine(), results, any::<bool>()).prop_map(|(engine, results, failed)| {
        let task = task("kw", engine);
        if failed {
            return ExecutionOutcome::failure(task, TaskError::EngineFailure("x".to_string()));
        }
        let results = results
            .into_iter()
            .map(|(n, source, days)| {
                let date = days.map(|d| now() - TimeDelta::days(d));
                result(&format!("https://p.test/{n}"), source, date)
            })
            .collect();
        ExecutionOutcome::success(task, results)
    })
}

proptest! {
    #[test]
    fn prop_aggregated_urls_are_unique(
        outcomes in prop::collection::vec(arb_outcome(), 0..6),
        months in prop::option::of(1u32..=12),
        sort in any::<bool>(),
    ) {
        let set = aggregate_at(&outcomes, months.map(RecencyFilter::months), sort, now());

        let mut seen = HashSet::new();
        for r in &set.results {
            prop_assert!(seen.insert(r.url.clone()), "duplicate url {}", r.url);
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        prop_assert_eq!(set.failures.len(), failed);

        if months.is_none() {
            let distinct: HashSet<&str> = outcomes
                .iter()
                .flat_map(|o| o.results.iter().map(|r| r.url.as_str()))
                .collect();
            prop_assert_eq!(set.results.len(), distinct.len());
        }
    }
}
