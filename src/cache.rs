use crate::archive::sort_newest_first;
use crate::fetcher::FeedFetcher;
use crate::normalize::normalize_item;
use crate::parser::parse_feed;
use crate::slug::assign_unique_slugs;
use crate::types::{Issue, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

struct CacheEntry {
    issues: Arc<Vec<Issue>>,
    fetched_at: Instant,
}

/// Time-bounded memoization of the fetch -> parse -> normalize -> sort ->
/// slug-assign pipeline.
///
/// The slot mutex is held across a refresh, so concurrent callers at expiry
/// share a single upstream fetch and all observe the same rebuilt collection.
/// A failed refresh leaves the slot untouched; lock-waiters that arrive after
/// the failure start their own attempt and see that attempt's error. There is
/// no stale-on-error fallback.
pub struct FeedCache {
    slot: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl FeedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    /// The cached collection, refreshed from upstream when absent or expired.
    pub async fn get_or_refresh(&self, fetcher: &FeedFetcher) -> Result<Arc<Vec<Issue>>> {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.issues));
            }
            debug!("Feed cache expired after {:?}", self.ttl);
        }

        let issues = Arc::new(build_collection(fetcher).await?);
        info!("Rebuilt issue collection ({} issues)", issues.len());

        *slot = Some(CacheEntry {
            issues: Arc::clone(&issues),
            fetched_at: Instant::now(),
        });
        Ok(issues)
    }
}

/// Run the whole pipeline once: fetch, parse, normalize, sort, assign slugs.
///
/// Each run produces an entirely new immutable collection; nothing is mutated
/// in place between refreshes.
pub async fn build_collection(fetcher: &FeedFetcher) -> Result<Vec<Issue>> {
    let body = fetcher.fetch().await?;
    let raw_items = parse_feed(&body)?;

    let mut issues: Vec<Issue> = raw_items.into_iter().map(normalize_item).collect();
    sort_newest_first(&mut issues);
    Ok(assign_unique_slugs(issues))
}
