//! README rendering.
//!
//! Remote Markdown is converted with pulldown-cmark. Raw HTML inside the
//! document is escaped rather than passed through, and links or images whose
//! destination uses a scriptable scheme lose that destination. The resulting
//! HTML is then inserted into the page without further escaping.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

/// What a project card shows under its description. Exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    Documentation(String),
    Placeholder(String),
}

impl CardBody {
    pub fn html(&self) -> &str {
        match self {
            CardBody::Documentation(html) | CardBody::Placeholder(html) => html,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, CardBody::Placeholder(_))
    }
}

pub fn render(doc: Option<&str>, repo_name: &str, owner: &str) -> CardBody {
    match doc.filter(|text| !text.trim().is_empty()) {
        Some(text) => CardBody::Documentation(to_html(text)),
        None => CardBody::Placeholder(to_html(&placeholder_summary(repo_name, owner))),
    }
}

/// Fixed stand-in text for repositories without a README.
pub fn placeholder_summary(repo_name: &str, owner: &str) -> String {
    format!(
        "\u{1F6A7} *No README available*. This project, **{repo_name}**, appears to be a \
         data-focused repository by {owner}. Check the code for more info."
    )
}

pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(neutralize);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn neutralize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    let normalized: String = dest
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if BLOCKED_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
    {
        CowStr::Borrowed("")
    } else {
        dest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_readme_gets_placeholder_naming_repo() {
        let body = render(None, "foo", "Malleswara");
        assert!(body.is_placeholder());
        assert!(body.html().contains("foo"));
        assert!(body.html().contains("README"));
        assert!(body.html().contains("<strong>foo</strong>"));
    }

    #[test]
    fn blank_readme_counts_as_missing() {
        assert!(render(Some("  \n"), "bar", "owner").is_placeholder());
    }

    #[test]
    fn code_is_kept_as_code_element() {
        let body = render(Some("# Hello\n\n```code```"), "foo", "owner");
        assert!(!body.is_placeholder());
        assert!(body.html().contains("<h1>Hello</h1>"));
        assert!(body.html().contains("<code>code</code>"));
    }

    #[test]
    fn fenced_block_keeps_language_class() {
        let html = to_html("```rust\nfn main() {}\n```\n");
        assert!(html.contains("<pre><code class=\"language-rust\">"));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = to_html("hi <script>alert(1)</script>\n\n<div onclick=\"x\">y</div>\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<div onclick"));
    }

    #[test]
    fn scriptable_links_lose_destination() {
        let html = to_html("[click](javascript:alert(1)) and [ok](https://example.com)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn tables_are_enabled() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
