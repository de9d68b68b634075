//! Path-based crawl filters
//!
//! Cheap checks that run before any request is made: known non-HTML file
//! extensions and path segments that mark non-documentation pages.

use url::Url;

/// File extensions that never hold HTML documentation
const NON_HTML_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".svg", ".ico", ".js", ".css", ".xml", ".zip",
    ".tar", ".gz", ".json", ".mp4", ".woff", ".woff2",
];

/// Path segments of account, legal and contact pages
const BLACKLISTED_SEGMENTS: &[&str] = &[
    "login", "signin", "signup", "register", "logout", "privacy", "terms", "legal", "cookie",
    "cookies", "contact",
];

/// Returns true if the URL path ends in a known non-HTML extension
pub fn has_non_html_extension(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    NON_HTML_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Returns true if any path segment is a known non-documentation segment
pub fn is_blacklisted_path(url: &Url) -> bool {
    url.path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .any(|segment| {
            let segment = segment.to_lowercase();
            BLACKLISTED_SEGMENTS.contains(&segment.as_str())
        })
}
