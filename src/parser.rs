use crate::types::{ArchiveError, Result};
use chrono::{DateTime, Utc};
use feed_rs::parser;
use tracing::{debug, info};

/// One feed entry as extracted from the XML, before normalization.
///
/// Every field is optional; normalization decides the fallbacks.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub content: Option<String>,
}

/// Parse a syndication feed body into raw items.
pub fn parse_feed(content: &str) -> Result<Vec<RawItem>> {
    debug!("Parsing feed content ({} bytes)", content.len());

    let feed = parser::parse(content.as_bytes())
        .map_err(|e| ArchiveError::Parse(format!("Failed to parse feed: {}", e)))?;

    let items: Vec<RawItem> = feed.entries.into_iter().map(raw_item).collect();
    info!("Parsed feed with {} entries", items.len());
    Ok(items)
}

fn raw_item(entry: feed_rs::model::Entry) -> RawItem {
    let guid = if entry.id.is_empty() {
        None
    } else {
        Some(entry.id)
    };

    let title = entry.title.map(|t| t.content);
    let link = entry.links.first().map(|l| l.href.clone());
    let description = entry.summary.map(|s| s.content);
    // feed-rs folds RSS content:encoded into the entry's content body.
    let content = entry.content.and_then(|c| c.body);

    let published = entry.published.map(|dt| dt.with_timezone(&Utc));
    let updated = entry.updated.map(|dt| dt.with_timezone(&Utc));

    RawItem {
        guid,
        title,
        link,
        published,
        updated,
        description,
        content,
    }
}
