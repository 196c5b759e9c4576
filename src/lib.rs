pub mod archive;
pub mod cache;
pub mod config;
pub mod fetcher;
pub mod handlers;
pub mod normalize;
pub mod parser;
pub mod render;
pub mod routes;
pub mod sanitize;
pub mod slug;
pub mod state;
pub mod summarize;
pub mod types;

pub use cache::FeedCache;
pub use config::AppConfig;
pub use fetcher::FeedFetcher;
pub use routes::create_router;
pub use state::AppState;
pub use summarize::{OpenAiSummarizer, Summarizer};
pub use types::{ArchiveError, Issue, IssueGroup, Result};
