use crate::archive::date_time_label;
use crate::sanitize::sanitize_issue_html;
use crate::types::{ArchivePage, Issue, IssueGroup};

const NO_CONTENT: &str = "<p>No content available for this issue.</p>";

/// Escape text for interpolation into HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// The archive listing: issues for one page, grouped by day.
pub fn archive_page(page: &ArchivePage, groups: &[IssueGroup]) -> String {
    let mut body = String::from("<main class=\"archive\">\n<h1>Issue archive</h1>\n");

    if page.issues.is_empty() {
        body.push_str("<p>No issues yet.</p>\n");
    }

    for group in groups {
        body.push_str(&format!("<section>\n<h2>{}</h2>\n<ul>\n", escape(&group.day_label)));
        for issue in &group.items {
            body.push_str(&format!(
                "<li><a href=\"/issues/{}\">{}</a><p>{}</p></li>\n",
                escape(&issue.slug),
                escape(&issue.title),
                escape(&issue.summary),
            ));
        }
        body.push_str("</ul>\n</section>\n");
    }

    body.push_str(&pager(page.page, page.total_pages));
    body.push_str("</main>");
    shell(&format!("Issue archive - page {}", page.page), &body)
}

fn pager(page: usize, total_pages: usize) -> String {
    let mut nav = String::from("<nav class=\"pager\">\n");
    if page > 1 {
        nav.push_str(&format!("<a href=\"/page/{}\">Newer</a>\n", page - 1));
    }
    nav.push_str(&format!("<span>Page {} of {}</span>\n", page, total_pages));
    if page < total_pages {
        nav.push_str(&format!("<a href=\"/page/{}\">Older</a>\n", page + 1));
    }
    nav.push_str("</nav>\n");
    nav
}

/// One issue with its sanitized body.
pub fn issue_page(issue: &Issue) -> String {
    let content = if issue.content_html.is_empty() {
        NO_CONTENT.to_string()
    } else {
        sanitize_issue_html(&issue.content_html)
    };

    let source_link = match &issue.link {
        Some(link) => format!(
            "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View original</a></p>\n",
            escape(link)
        ),
        None => String::new(),
    };

    let body = format!(
        "<main class=\"issue\">\n<p><a href=\"/\">Back to archive</a></p>\n\
         <h1>{}</h1>\n<p class=\"date\">{}</p>\n{}\
         <article class=\"issue-content\">\n{}\n</article>\n</main>",
        escape(&issue.title),
        escape(&date_time_label(issue.date.as_ref())),
        source_link,
        content,
    );
    shell(&issue.title, &body)
}

pub fn not_found_page() -> String {
    shell(
        "Not found",
        "<main>\n<h1>Not found</h1>\n<p>That page or issue does not exist.</p>\n\
         <p><a href=\"/\">Back to archive</a></p>\n</main>",
    )
}

pub fn feed_error_page(message: &str) -> String {
    let body = format!(
        "<main>\n<h1>Feed unavailable</h1>\n<p>{}</p>\n</main>",
        escape(message)
    );
    shell("Feed unavailable", &body)
}
