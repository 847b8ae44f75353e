//! Page layout
//!
//! Two-column shell: a sidebar on the left and a centered content column
//! with a search form above the page body.

use axum::response::{Html, IntoResponse, Response};

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif}\
.layout{display:grid;grid-template-columns:auto 1fr;gap:1rem}\
.sidebar{padding:2rem 1rem}\
.sidebar ul{list-style:none;margin:0;padding:0}\
.content{max-width:1440px;width:100%;margin:0 auto;padding:2rem;box-sizing:border-box}\
.search{margin-bottom:2rem}";

const SIDEBAR_LINKS: &[(&str, &str)] = &[("/", "Home"), ("/login", "Sign in"), ("/signup", "Sign up")];

/// A rendered page body and its title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Document title
    pub title: String,
    /// Page body HTML
    pub body: String,
}

impl Page {
    /// Create a page
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Full HTML document
    pub fn render(&self) -> String {
        render_layout(&self.title, &self.body)
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        Html(self.render()).into_response()
    }
}

/// Render `children` inside the layout shell
///
/// `children` is inserted as-is; `title` is escaped.
pub fn render_layout(title: &str, children: &str) -> String {
    let links: String = SIDEBAR_LINKS
        .iter()
        .map(|(href, label)| format!(r#"<li><a href="{href}">{label}</a></li>"#))
        .collect();

    format!(
        concat!(
            "<!DOCTYPE html>",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            "<title>{title}</title><style>{style}</style></head>",
            r#"<body><div class="layout">"#,
            r#"<aside class="sidebar"><nav><ul>{links}</ul></nav></aside>"#,
            r#"<main class="content">"#,
            r#"<form class="search" role="search" method="get" action="/">"#,
            r#"<input type="search" name="q" placeholder="Search" aria-label="Search">"#,
            "</form>{children}</main></div></body></html>"
        ),
        title = escape_html(title),
        style = STYLE,
        links = links,
        children = children,
    )
}

/// Escape text for use in HTML content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
