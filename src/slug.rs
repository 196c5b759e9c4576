use crate::types::Issue;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Slugs are truncated to keep permalinks readable.
pub const SLUG_MAX_LEN: usize = 80;

static URL_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://").expect("valid regex"));

/// Legacy two-digit-year permalink: `YY-MM-DD` with an optional suffix.
static LEGACY_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{2})(-.+)?$").expect("valid regex"));

static DAY_KEY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})").expect("valid regex"));

static SHORT_DAY_KEY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{2})").expect("valid regex"));

/// Reduce any candidate string to a URL-safe slug.
///
/// Lowercase, URL schemes removed, every run of non `[a-z0-9]` collapsed to a
/// single hyphen, outer hyphens trimmed, truncated to [`SLUG_MAX_LEN`].
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let no_scheme = URL_SCHEME.replace_all(&lowered, "");

    let mut slug = String::with_capacity(no_scheme.len());
    let mut pending_hyphen = false;
    for c in no_scheme.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(SLUG_MAX_LEN);
    // Truncation may land on a hyphen; trim so the transform stays idempotent.
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slug candidate from a link's last non-empty path segment.
///
/// A link that does not parse as a URL is slugified wholesale.
pub fn slug_from_link(link: Option<&str>) -> Option<String> {
    let link = link?;
    let candidate = match Url::parse(link) {
        Ok(url) => {
            let last = url
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())?
                .to_string();
            slugify(&last)
        }
        Err(_) => slugify(link),
    };

    if candidate.is_empty() {
        None
    } else {
        Some(candidate)
    }
}

/// Slug source, in priority order: link path segment, day key, title.
fn base_slug(issue: &Issue) -> String {
    if let Some(from_link) = slug_from_link(issue.link.as_deref()) {
        return from_link;
    }
    if issue.date.is_some() {
        return issue.day_key.clone();
    }
    let from_title = slugify(&issue.title);
    if from_title.is_empty() {
        "issue".to_string()
    } else {
        from_title
    }
}

/// Assign unique slugs across a collection, in its final sorted order.
///
/// The first occurrence of a base slug keeps it; the Nth occurrence gets a
/// `-N` suffix (starting at `-2`).
pub fn assign_unique_slugs(issues: Vec<Issue>) -> Vec<Issue> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    issues
        .into_iter()
        .map(|mut issue| {
            let base = base_slug(&issue);
            let seen = counts.entry(base.clone()).or_insert(0);
            *seen += 1;
            issue.slug = if *seen == 1 {
                base
            } else {
                format!("{}-{}", base, *seen)
            };
            issue
        })
        .collect()
}

/// Percent-decode and lowercase an incoming path segment.
///
/// Undecodable input is used verbatim; lookups should not fail on it.
pub fn normalize_slug_input(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.to_lowercase(),
        Err(_) => raw.to_lowercase(),
    }
}

/// Rewrite a legacy `YY-MM-DD[-suffix]` slug to its four-digit-year form.
pub fn expand_two_digit_year(slug: &str) -> Option<String> {
    let caps = LEGACY_DATE.captures(slug)?;
    Some(format!(
        "20{}-{}-{}{}",
        &caps[1],
        &caps[2],
        &caps[3],
        caps.get(4).map_or("", |m| m.as_str())
    ))
}

/// Day key implied by a slug's date prefix, four- or two-digit year.
pub fn day_key_from_slug(slug: &str) -> Option<String> {
    if let Some(caps) = DAY_KEY_PREFIX.captures(slug) {
        return Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]));
    }
    if let Some(caps) = SHORT_DAY_KEY_PREFIX.captures(slug) {
        return Some(format!("20{}-{}-{}", &caps[1], &caps[2], &caps[3]));
    }
    None
}

/// Resolve a raw path segment to an issue.
///
/// Exact slug match first (including the expanded legacy form), then a linear
/// fallback over each issue's other identities. Feed content can drift
/// between refreshes, so lookup tolerates format changes rather than assuming
/// the stored slug is the only resolvable name.
pub fn find_by_slug<'a>(issues: &'a [Issue], raw: &str) -> Option<&'a Issue> {
    let normalized = normalize_slug_input(raw);
    let expanded = expand_two_digit_year(&normalized);
    let day_key = day_key_from_slug(&normalized);

    let matches_input = |candidate: &str| {
        candidate == normalized || expanded.as_deref() == Some(candidate)
    };

    if let Some(hit) = issues.iter().find(|issue| matches_input(&issue.slug)) {
        return Some(hit);
    }

    debug!("No exact slug match for {:?}, scanning fallbacks", normalized);

    issues.iter().find(|issue| {
        matches_input(&issue.day_key)
            || matches_input(&slugify(&issue.title))
            || slug_from_link(issue.link.as_deref())
                .map(|s| matches_input(&s))
                .unwrap_or(false)
            || day_key.as_deref() == Some(issue.day_key.as_str())
    })
}
