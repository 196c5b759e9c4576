use crate::config::AppConfig;
use crate::types::{ArchiveError, Result};
use reqwest::Client;
use tracing::{debug, info};

/// Fetches the raw XML body of the configured feed.
///
/// Exactly one request per call: a non-success status or transport error is
/// fatal for the current refresh cycle, with no retry and no stale fallback.
pub struct FeedFetcher {
    client: Client,
    feed_url: String,
}

impl FeedFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.fetch_timeout)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            feed_url: config.feed_url.clone(),
        })
    }

    pub async fn fetch(&self) -> Result<String> {
        debug!("Fetching feed: {}", self.feed_url);

        let response = self.client.get(&self.feed_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ArchiveError::FeedUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        info!("Fetched feed: {} ({} bytes)", self.feed_url, body.len());
        Ok(body)
    }
}
