use crate::cache::FeedCache;
use crate::config::AppConfig;
use crate::fetcher::FeedFetcher;
use crate::summarize::Summarizer;
use crate::types::{Issue, Result};
use std::sync::Arc;

/// Shared per-request services. Cheap to clone; the issue collection itself
/// lives behind the cache and is replaced wholesale on refresh.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    fetcher: Arc<FeedFetcher>,
    cache: Arc<FeedCache>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(config: AppConfig, summarizer: Arc<dyn Summarizer>) -> Result<Self> {
        let fetcher = Arc::new(FeedFetcher::new(&config)?);
        let cache = Arc::new(FeedCache::new(config.cache_ttl));

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            cache,
            summarizer,
        })
    }

    /// The current issue collection, via the cache.
    pub async fn issues(&self) -> Result<Arc<Vec<Issue>>> {
        self.cache.get_or_refresh(&self.fetcher).await
    }
}
