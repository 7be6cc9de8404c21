//! Live searches through a real browser

use browser_search::{
    BrowserManager, Engine, EngineRegistry, ExtractOptions, SearchRequest, TaskOptions,
    aggregate, build_plan, execute, extract_content, search_with_manager,
};
use std::time::Duration;

fn request(keyword: &str, engine: Engine) -> SearchRequest {
    SearchRequest {
        keyword: keyword.to_string(),
        engine,
        num_results: 5,
        timeout: Duration::from_secs(30),
        headless: true,
    }
}

#[tokio::test]
#[ignore] // Requires browser installation
async fn test_search_basic() {
    let manager = BrowserManager::new();
    let results = search_with_manager(&manager, request("rust programming", Engine::DuckDuckGo))
        .await
        .unwrap();
    manager.shutdown().await.unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 5);
    for (i, r) in results.iter().enumerate() {
        assert_eq!(r.position, i + 1);
        assert!(r.url.starts_with("http"));
        assert_eq!(r.source, Engine::DuckDuckGo);
    }
}

#[tokio::test]
#[ignore] // Requires network access; may download Chromium
async fn test_warm_up_keeps_launch_out_of_task_timeouts() {
    let manager = BrowserManager::with_request_timeout(Duration::from_secs(10));
    manager.warm_up(true).await.unwrap();

    // Short per-task deadlines only have to cover the searches themselves
    let registry = EngineRegistry::chromium(manager.clone());
    let options = TaskOptions {
        timeout: Duration::from_secs(10),
        ..TaskOptions::default()
    };
    let keywords = vec!["rust".to_string(), "tokio".to_string()];
    let plan = build_plan(
        "rust",
        "technology",
        Some(keywords.as_slice()),
        &[Engine::DuckDuckGo],
        &options,
        3,
    )
    .unwrap();

    let outcomes = execute(&plan, 2, &registry).await.unwrap();
    assert!(outcomes.iter().all(|o| o.is_success()), "{outcomes:?}");
    manager.shutdown().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires browser installation and network access
async fn test_plan_against_real_engines() {
    let manager = BrowserManager::new();
    let registry = EngineRegistry::chromium(manager.clone());
    let plan = build_plan(
        "tokio runtime",
        "technology",
        None,
        &[Engine::DuckDuckGo, Engine::Bing],
        &TaskOptions::default(),
        5,
    )
    .unwrap();

    let outcomes = execute(&plan, 2, &registry).await.unwrap();
    assert_eq!(outcomes.len(), plan.tasks.len());

    let set = aggregate(&outcomes, None, false);
    assert!(!set.results.is_empty());
    manager.shutdown().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires browser installation
async fn test_extract_content() {
    let manager = BrowserManager::new();
    let options = ExtractOptions {
        timeout: Duration::from_secs(30),
        headless: true,
    };
    let content = extract_content(&manager, "https://www.rust-lang.org/", options).await;
    manager.shutdown().await.unwrap();

    assert!(content.error.is_none(), "{:?}", content.error);
    assert!(content.word_count > 0);
}

#[tokio::test]
async fn test_extract_rejects_non_http_urls() {
    let manager = BrowserManager::new();
    let options = ExtractOptions {
        timeout: Duration::from_secs(5),
        headless: true,
    };
    let content = extract_content(&manager, "file:///etc/passwd", options).await;

    assert!(content.error.is_some());
    assert_eq!(content.url, "file:///etc/passwd");
    assert!(content.text.is_empty());
}
