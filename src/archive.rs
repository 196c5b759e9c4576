use crate::types::{ArchiveError, ArchivePage, Issue, IssueGroup, Result};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use tracing::debug;

pub const PAGE_SIZE: usize = 20;

/// Sort newest first. Issues without a date sort as if published at the
/// epoch, i.e. to the oldest position. The sort is stable, so feed order is
/// preserved among equal timestamps.
pub fn sort_newest_first(issues: &mut [Issue]) {
    issues.sort_by_key(|issue| Reverse(issue.date.map(|d| d.timestamp_millis()).unwrap_or(0)));
}

pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size).max(1)
}

/// Slice one 1-based page out of the collection.
///
/// A page index past the end is a not-found condition, distinct from any
/// fetch failure.
pub fn paginate(issues: &[Issue], page: usize, page_size: usize) -> Result<ArchivePage> {
    let total = total_pages(issues.len(), page_size);
    if page == 0 || page > total {
        debug!("Page {} out of range (1..={})", page, total);
        return Err(ArchiveError::NotFound);
    }

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(issues.len());
    let slice = issues.get(start..end).unwrap_or(&[]);

    Ok(ArchivePage {
        issues: slice.to_vec(),
        page,
        total_pages: total,
    })
}

/// Human-readable day heading, e.g. "November 3, 2024".
pub fn day_label(date: Option<&DateTime<Utc>>) -> String {
    match date {
        None => "Unknown date".to_string(),
        Some(d) => d.format("%B %-d, %Y").to_string(),
    }
}

/// Full timestamp label for an issue page header.
pub fn date_time_label(date: Option<&DateTime<Utc>>) -> String {
    match date {
        None => "Unknown date".to_string(),
        Some(d) => d.format("%A, %B %-d, %Y at %-I:%M %p UTC").to_string(),
    }
}

/// Bucket one page's issues by calendar day, preserving the order in which
/// days are first encountered. The label is derived once per group.
pub fn group_by_day(issues: &[Issue]) -> Vec<IssueGroup> {
    let mut groups: Vec<IssueGroup> = Vec::new();

    for issue in issues {
        match groups.iter_mut().find(|g| g.day_key == issue.day_key) {
            Some(group) => group.items.push(issue.clone()),
            None => groups.push(IssueGroup {
                day_key: issue.day_key.clone(),
                day_label: day_label(issue.date.as_ref()),
                items: vec![issue.clone()],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issue(id: &str, ymd: Option<(i32, u32, u32)>) -> Issue {
        let date = ymd.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap());
        Issue {
            id: id.to_string(),
            title: id.to_string(),
            link: None,
            date,
            day_key: crate::normalize::day_key(date.as_ref()),
            slug: id.to_string(),
            summary: "s".to_string(),
            content_html: String::new(),
        }
    }

    #[test]
    fn sorts_newest_first_with_undated_last() {
        let mut issues = vec![
            issue("old", Some((2024, 1, 1))),
            issue("undated", None),
            issue("new", Some((2024, 1, 2))),
        ];
        sort_newest_first(&mut issues);
        let order: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, ["new", "old", "undated"]);
    }

    #[test]
    fn pagination_arithmetic() {
        let issues: Vec<Issue> = (0..45)
            .map(|i| issue(&format!("i{}", i), Some((2024, 1, 1))))
            .collect();

        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(0, 20), 1);

        let page3 = paginate(&issues, 3, 20).unwrap();
        assert_eq!(page3.issues.len(), 5);
        assert_eq!(page3.total_pages, 3);

        assert!(matches!(
            paginate(&issues, 4, 20),
            Err(ArchiveError::NotFound)
        ));
        assert!(matches!(
            paginate(&issues, 0, 20),
            Err(ArchiveError::NotFound)
        ));
    }

    #[test]
    fn empty_collection_still_has_one_page() {
        let page = paginate(&[], 1, 20).unwrap();
        assert!(page.issues.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn groups_preserve_first_seen_day_order() {
        let issues = vec![
            issue("a", Some((2024, 11, 3))),
            issue("b", Some((2024, 11, 3))),
            issue("c", Some((2024, 11, 2))),
            issue("d", None),
        ];
        let groups = group_by_day(&issues);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].day_key, "2024-11-03");
        assert_eq!(groups[0].day_label, "November 3, 2024");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].day_key, "2024-11-02");
        assert_eq!(groups[2].day_key, "unknown");
        assert_eq!(groups[2].day_label, "Unknown date");
    }

    #[test]
    fn labels_handle_missing_dates() {
        assert_eq!(day_label(None), "Unknown date");
        assert_eq!(date_time_label(None), "Unknown date");
        let d = Utc.with_ymd_and_hms(2024, 11, 3, 14, 30, 0).unwrap();
        assert_eq!(date_time_label(Some(&d)), "Sunday, November 3, 2024 at 2:30 PM UTC");
    }
}
