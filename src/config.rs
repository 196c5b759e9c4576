use std::env;
use std::time::Duration;

/// Runtime configuration, sourced from the environment with sensible defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub page_size: usize,
    pub cache_ttl: Duration,
    pub user_agent: String,
    /// Timeout for the feed fetch itself.
    pub fetch_timeout: Duration,
    pub summary: SummaryConfig,
}

/// Settings for the summarization upstream (an OpenAI-compatible API).
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Budget for the single upstream call; the request is aborted when it elapses.
    pub timeout: Duration,
    pub max_content_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://news.smol.ai/rss.xml".to_string(),
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            page_size: 20,
            cache_ttl: Duration::from_secs(600),
            user_agent: "issue-archive/0.1".to_string(),
            fetch_timeout: Duration::from_secs(30),
            summary: SummaryConfig::default(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4.1-mini".to_string(),
            timeout: Duration::from_secs(20),
            max_content_chars: 25_000,
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("FEED_URL") {
            config.feed_url = url;
        }
        if let Ok(addr) = env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            config.port = port;
        }
        if let Some(secs) = env::var("CACHE_TTL_SECS").ok().and_then(|v| v.parse().ok()) {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            config.summary.api_key = key;
        }
        if let Ok(base) = env::var("OPENAI_BASE_URL") {
            config.summary.base_url = base;
        }
        if let Ok(model) = env::var("OPENAI_MODEL") {
            config.summary.model = model;
        }

        config
    }
}
