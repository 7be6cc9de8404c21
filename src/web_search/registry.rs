//! Engine capability table
//!
//! The coordinator never talks to a browser directly. It looks up the
//! engine's `SearchFn` here and calls it, so tests can register plain async
//! closures in place of Chromium.

use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::manager::BrowserManager;
use super::types::{Engine, SearchRequest, SearchResult};
use crate::error::SearchError;

/// Future returned by a [`SearchFn`]
pub type SearchFuture = BoxFuture<'static, Result<Vec<SearchResult>, SearchError>>;

/// The `search` capability of one engine
pub type SearchFn = Arc<dyn Fn(SearchRequest) -> SearchFuture + Send + Sync>;

/// Mapping from engine identifier to its search capability
#[derive(Clone, Default)]
pub struct EngineRegistry {
    adapters: HashMap<Engine, SearchFn>,
}

impl EngineRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry backed by shared Chromium browsers for every engine
    #[must_use]
    pub fn chromium(manager: BrowserManager) -> Self {
        let mut registry = Self::new();
        for engine in Engine::ALL {
            let manager = manager.clone();
            registry.register(engine, move |request| {
                let manager = manager.clone();
                async move { super::search_with_manager(&manager, request).await }
            });
        }
        registry
    }

    /// Register (or replace) the adapter for `engine`
    pub fn register<F, Fut>(&mut self, engine: Engine, search: F) -> &mut Self
    where
        F: Fn(SearchRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<SearchResult>, SearchError>> + Send + 'static,
    {
        let search: SearchFn = Arc::new(move |request| search(request).boxed());
        self.adapters.insert(engine, search);
        self
    }

    /// Builder-style [`register`](Self::register)
    #[must_use]
    pub fn with<F, Fut>(mut self, engine: Engine, search: F) -> Self
    where
        F: Fn(SearchRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<SearchResult>, SearchError>> + Send + 'static,
    {
        self.register(engine, search);
        self
    }

    #[must_use]
    pub fn get(&self, engine: Engine) -> Option<SearchFn> {
        self.adapters.get(&engine).cloned()
    }

    #[must_use]
    pub fn contains(&self, engine: Engine) -> bool {
        self.adapters.contains_key(&engine)
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut engines: Vec<_> = self.adapters.keys().collect();
        engines.sort();
        f.debug_struct("EngineRegistry")
            .field("engines", &engines)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn request(engine: Engine) -> SearchRequest {
        SearchRequest {
            keyword: "rust".into(),
            engine,
            num_results: 3,
            timeout: Duration::from_secs(5),
            headless: true,
        }
    }

    #[tokio::test]
    async fn registered_closure_is_dispatched() {
        let registry = EngineRegistry::new().with(Engine::Bing, |req: SearchRequest| async move {
            Ok(vec![SearchResult::new(
                req.keyword,
                "https://bing.test/",
                "",
                req.engine,
            )])
        });

        assert!(registry.contains(Engine::Bing));
        assert!(registry.get(Engine::Google).is_none());

        let search = registry.get(Engine::Bing).unwrap();
        let results = search(request(Engine::Bing)).await.unwrap();
        assert_eq!(results[0].title, "rust");
        assert_eq!(results[0].source, Engine::Bing);
    }

    #[test]
    fn chromium_registry_covers_every_engine() {
        let registry = EngineRegistry::chromium(BrowserManager::new());
        for engine in Engine::ALL {
            assert!(registry.contains(engine));
        }
    }
}
