use crate::parser::RawItem;
use crate::sanitize::html_to_text;
use crate::types::Issue;
use chrono::{DateTime, Utc};

pub const NO_SUMMARY: &str = "No summary available.";
pub const UNKNOWN_DAY: &str = "unknown";
const UNTITLED: &str = "Untitled issue";

/// First non-empty candidate in priority order.
///
/// Field selection is an explicit candidate list so each fallback chain can
/// be tested on its own.
pub fn pick_first<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

/// Canonical `YYYY-MM-DD` key for a publish date (UTC calendar day).
pub fn day_key(date: Option<&DateTime<Utc>>) -> String {
    match date {
        None => UNKNOWN_DAY.to_string(),
        Some(d) => d.format("%Y-%m-%d").to_string(),
    }
}

/// Convert one raw feed item into a canonical issue record.
///
/// Missing fields never error: every field degrades to a documented fallback.
/// The slug stays empty here; it is assigned once the whole collection is
/// sorted (see `slug::assign_unique_slugs`).
pub fn normalize_item(raw: RawItem) -> Issue {
    let date = raw.published.or(raw.updated);
    let day_key = day_key(date.as_ref());

    let summary_raw =
        pick_first([raw.description.as_deref(), raw.content.as_deref()]).unwrap_or("");
    let summary = {
        let text = html_to_text(summary_raw);
        if text.is_empty() {
            NO_SUMMARY.to_string()
        } else {
            text
        }
    };

    let content_html = pick_first([raw.content.as_deref(), raw.description.as_deref()])
        .unwrap_or("")
        .to_string();

    let id = pick_first([raw.guid.as_deref(), raw.link.as_deref(), raw.title.as_deref()])
        .map(str::to_string)
        .unwrap_or_else(|| format!("issue-{}", day_key));

    let title = html_to_text(raw.title.as_deref().unwrap_or(UNTITLED));

    Issue {
        id,
        title,
        link: raw.link,
        date,
        day_key,
        slug: String::new(),
        summary,
        content_html,
    }
}
