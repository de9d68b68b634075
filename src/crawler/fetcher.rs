//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler, including:
//! - Building the HTTP client with a descriptive user agent
//! - Surfacing redirects to the caller instead of following them
//! - Retry with exponential backoff for transient failures
//! - Classification of every outcome into a [`FetchResult`]

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::{header, redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Base delay before the first retry; doubled on each further attempt
const RETRY_BACKOFF_BASE: Duration = Duration::from_millis(300);

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Response was not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// A 3xx response; the caller decides whether to follow it
    Redirect {
        /// The HTTP status code
        status_code: u16,
        /// Raw `Location` header value, possibly relative
        location: String,
    },

    /// Non-2xx HTTP response after retries
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, DNS failure, timeout)
    NetworkError {
        /// Error description
        error: String,
        /// Error classification
        kind: NetworkErrorKind,
    },
}

/// Classification of transport-level failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    /// The request timed out
    Timeout,
    /// Connection refused, DNS or TLS failure
    Connect,
    /// Anything else, including an unreadable body
    Other,
}

impl FetchResult {
    fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError { status_code } => {
                *status_code == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status_code >= 500
            }
            Self::NetworkError { kind, .. } => *kind == NetworkErrorKind::Timeout,
            _ => false,
        }
    }
}

/// Builds the HTTP client used for page and robots.txt requests
///
/// The client never follows redirects on its own; every hop goes back to the
/// crawler so scope and visited checks apply before the next request.
///
/// # Example
///
/// ```no_run
/// use pulse::config::{CrawlerConfig, UserAgentConfig};
/// use pulse::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.timeout))
        .connect_timeout(Duration::from_secs(crawler.timeout.min(10)))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying transient failures
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 429 | Retry up to `max_retries` times with backoff |
/// | HTTP 5xx | Retry up to `max_retries` times with backoff |
/// | Timeout | Retry up to `max_retries` times with backoff |
/// | Other 4xx | Immediate → HttpError |
/// | Connection refused / DNS | Immediate → NetworkError |
/// | HTTP 3xx with Location | Immediate → Redirect |
/// | Non-HTML Content-Type | Immediate → ContentMismatch |
pub async fn fetch_url(client: &Client, url: &str, max_retries: u32) -> FetchResult {
    let mut attempt = 0;
    loop {
        let result = fetch_once(client, url).await;
        if !result.is_retryable() || attempt >= max_retries {
            return result;
        }

        let backoff = RETRY_BACKOFF_BASE * 2u32.saturating_pow(attempt);
        tracing::debug!(
            "Retrying {} in {:?} (attempt {} of {}): {:?}",
            url,
            backoff,
            attempt + 1,
            max_retries,
            result
        );
        tokio::time::sleep(backoff).await;
        attempt += 1;
    }
}

/// Performs a single GET request and classifies the response
async fn fetch_once(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();

    if status.is_redirection() {
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        return match location {
            Some(location) => FetchResult::Redirect {
                status_code: status.as_u16(),
                location,
            },
            None => FetchResult::HttpError {
                status_code: status.as_u16(),
            },
        };
    }

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    if !is_html_content_type(&content_type) {
        return FetchResult::ContentMismatch { content_type };
    }

    let final_url = response.url().to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => classify_error(&e),
    }
}

/// Maps a transport-level error to a NetworkError
fn classify_error(e: &reqwest::Error) -> FetchResult {
    let kind = if e.is_timeout() {
        NetworkErrorKind::Timeout
    } else if e.is_connect() {
        NetworkErrorKind::Connect
    } else {
        NetworkErrorKind::Other
    };

    FetchResult::NetworkError {
        error: e.to_string(),
        kind,
    }
}

/// Returns true for HTML and XHTML content types
pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}
