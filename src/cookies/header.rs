//! `Cookie` / `Set-Cookie` header handling
//!
//! Only the subset the session layer needs: name/value pairs on the way in,
//! `Max-Age` and `Path` attributes on the way out.

use std::collections::HashMap;

/// Attributes written alongside a cookie value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    /// Lifetime in seconds; `Some(0)` expires the cookie immediately
    pub max_age: Option<u64>,
    /// Path scope
    pub path: Option<String>,
}

impl CookieOptions {
    /// Create empty options (session cookie, no path)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max age in seconds
    pub fn with_max_age(mut self, max_age: u64) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Set path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Options that remove a cookie at `path`
    pub fn expired(path: Option<String>) -> Self {
        Self { max_age: Some(0), path }
    }
}

/// Parse a `Cookie` request header into name/value pairs
///
/// The first occurrence of a name wins. Values wrapped in double quotes are
/// unwrapped. Pairs without `=` or with an empty name are skipped.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for pair in header.split(';') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };

        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);

        cookies
            .entry(name.to_string())
            .or_insert_with(|| value.to_string());
    }

    cookies
}

/// Render a `Set-Cookie` header value
pub fn render_set_cookie(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut header = format!("{}={}", name, value);

    if let Some(max_age) = options.max_age {
        header.push_str(&format!("; Max-Age={}", max_age));
    }

    if let Some(path) = &options.path {
        header.push_str(&format!("; Path={}", path));
    }

    header
}
