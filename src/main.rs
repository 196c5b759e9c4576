use std::sync::Arc;

use anyhow::Result;
use issue_archive::{create_router, AppConfig, AppState, OpenAiSummarizer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    info!("Starting issue archive server");
    info!("Feed URL: {}", config.feed_url);

    if config.summary.api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; summarization requests will fail upstream");
    }

    let summarizer = Arc::new(OpenAiSummarizer::new(config.summary.clone())?);
    let addr = format!("{}:{}", config.bind_addr, config.port);
    let state = AppState::new(config, summarizer)?;
    let app = create_router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
