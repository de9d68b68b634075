use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pulse::url::extract_domain;
///
/// let url = Url::parse("https://Docs.Example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("docs.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the host with a leading `www.` removed
///
/// `www.example.com` and `example.com` serve the same site, so scope checks
/// compare hosts in this form.
pub fn site_host(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
