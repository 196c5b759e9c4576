use ammonia::Builder;
use once_cell::sync::Lazy;

const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "hr", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li", "blockquote", "strong",
    "em", "b", "i", "a", "pre", "code", "span", "div", "img", "table", "thead", "tbody", "tr",
    "th", "td",
];

/// Policy for issue bodies: structural markup only, safe link/image attributes.
static ISSUE_POLICY: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .generic_attributes(["class"].into_iter().collect())
        .add_tag_attributes("a", &["href", "title", "target"])
        .add_tag_attributes("img", &["src", "alt", "title", "width", "height", "loading"])
        .link_rel(Some("noopener noreferrer"));
    builder
});

static STRIP_ALL: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::empty();
    // Script and style bodies are noise, not text.
    builder.clean_content_tags(["script", "style"].into_iter().collect());
    builder
});

/// Reduce HTML to whitespace-normalized plain text.
pub fn html_to_text(html: &str) -> String {
    let stripped = STRIP_ALL.clean(html).to_string();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitize an issue body for rendering, keeping only allow-listed markup.
pub fn sanitize_issue_html(html: &str) -> String {
    ISSUE_POLICY.clean(html).to_string()
}
