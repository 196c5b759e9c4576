use chrono::{DateTime, Utc};
use serde::Serialize;

/// One normalized entry from the upstream feed, representing one daily digest.
///
/// The collection an `Issue` belongs to is immutable once built: every cache
/// refresh produces a brand-new `Vec<Issue>` with freshly assigned slugs.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    /// Stable identifier: feed guid, link, title, or synthesized from the day key.
    pub id: String,
    /// Plain-text title (HTML stripped).
    pub title: String,
    pub link: Option<String>,
    /// Publish timestamp, `None` when the feed gave nothing parseable.
    pub date: Option<DateTime<Utc>>,
    /// Canonical `YYYY-MM-DD` grouping key, or `"unknown"` when `date` is `None`.
    pub day_key: String,
    /// URL-safe unique identifier, assigned after the collection is sorted.
    pub slug: String,
    /// Plain-text excerpt, never empty (falls back to a placeholder).
    pub summary: String,
    /// Raw HTML body. Sanitized only at render time.
    pub content_html: String,
}

/// Issues sharing a calendar day, in first-seen order within a page.
#[derive(Debug, Clone, Serialize)]
pub struct IssueGroup {
    pub day_key: String,
    pub day_label: String,
    pub items: Vec<Issue>,
}

/// One page of the archive listing.
#[derive(Debug, Clone)]
pub struct ArchivePage {
    pub issues: Vec<Issue>,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Failed to fetch feed (HTTP {status})")]
    FeedUnavailable { status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Summarization request timed out. Please try again.")]
    SummaryTimeout,

    #[error("Empty summary returned.")]
    EmptySummary,

    #[error("{message}")]
    SummaryUpstream { status: Option<u16>, message: String },
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
