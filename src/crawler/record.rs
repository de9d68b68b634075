//! Crawl records: fetched pages and skipped targets
//!
//! Every target popped from the frontier ends up as exactly one of these.

use std::fmt;
use url::Url;

/// A successfully fetched HTML page
///
/// The raw HTML is transient: the pipeline hands the record to the content
/// extractor by value and the body is dropped right after extraction.
#[derive(Debug, Clone)]
pub struct PageRecord {
    /// Normalized final URL (after redirects); unique within a run
    pub url: Url,

    /// Normalized URL that was requested
    pub requested_url: Url,

    /// Discovery depth of the requested URL
    pub depth: u32,

    /// HTTP status of the final response
    pub status: u16,

    /// Content-Type header of the final response
    pub content_type: String,

    /// Raw HTML body
    pub html: String,
}

/// Why a popped target produced no page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    // ===== Policy exclusions (silent) =====
    /// Target is deeper than `max_depth`
    DepthExceeded,

    /// Host is outside the seed domain set
    OffDomain,

    /// Path names an account, legal or contact page
    BlacklistedPath,

    /// Path ends in a known non-HTML extension
    NonHtmlExtension,

    /// robots.txt disallows the URL
    RobotsDisallowed,

    /// A redirect resolved to a URL that was already fetched or queued
    DuplicateRedirect,

    /// A redirect pointed outside the seed domain set
    RedirectOutOfScope,

    /// Response Content-Type is not HTML
    ContentMismatch,

    // ===== Errors (recorded with a diagnostic) =====
    /// HTTP 404 or 410
    DeadLink,

    /// HTTP 429 after retries
    RateLimited,

    /// Any other non-2xx status
    HttpError,

    /// Connection refused, DNS failure, TLS failure
    Unreachable,

    /// Request timed out after retries
    Timeout,

    /// Any other transport failure (redirect loop, broken body)
    Failed,
}

impl SkipReason {
    /// Returns true for policy exclusions, which are not errors
    pub fn is_policy(&self) -> bool {
        matches!(
            self,
            Self::DepthExceeded
                | Self::OffDomain
                | Self::BlacklistedPath
                | Self::NonHtmlExtension
                | Self::RobotsDisallowed
                | Self::DuplicateRedirect
                | Self::RedirectOutOfScope
                | Self::ContentMismatch
        )
    }

    /// Returns true for network and HTTP failures
    pub fn is_error(&self) -> bool {
        !self.is_policy()
    }

    /// Maps a non-2xx status code to a reason
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            404 | 410 => Self::DeadLink,
            429 => Self::RateLimited,
            _ => Self::HttpError,
        }
    }

    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepthExceeded => "depth_exceeded",
            Self::OffDomain => "off_domain",
            Self::BlacklistedPath => "blacklisted_path",
            Self::NonHtmlExtension => "non_html_extension",
            Self::RobotsDisallowed => "robots_disallowed",
            Self::DuplicateRedirect => "duplicate_redirect",
            Self::RedirectOutOfScope => "redirect_out_of_scope",
            Self::ContentMismatch => "content_mismatch",
            Self::DeadLink => "dead_link",
            Self::RateLimited => "rate_limited",
            Self::HttpError => "http_error",
            Self::Unreachable => "unreachable",
            Self::Timeout => "timeout",
            Self::Failed => "failed",
        }
    }

    /// Returns all reasons, policy exclusions first
    pub fn all() -> [Self; 14] {
        [
            Self::DepthExceeded,
            Self::OffDomain,
            Self::BlacklistedPath,
            Self::NonHtmlExtension,
            Self::RobotsDisallowed,
            Self::DuplicateRedirect,
            Self::RedirectOutOfScope,
            Self::ContentMismatch,
            Self::DeadLink,
            Self::RateLimited,
            Self::HttpError,
            Self::Unreachable,
            Self::Timeout,
            Self::Failed,
        ]
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A popped target that produced no page
#[derive(Debug, Clone)]
pub struct SkippedPage {
    /// Normalized URL of the target
    pub url: Url,

    /// Discovery depth of the target
    pub depth: u32,

    /// Why it was skipped
    pub reason: SkipReason,

    /// HTTP status, when a response was received
    pub status: Option<u16>,

    /// Free-form diagnostic (error text, content type, redirect target)
    pub detail: Option<String>,
}

/// Everything one crawl produced, in fetch order
#[derive(Debug, Default)]
pub struct CrawlOutput {
    /// Fetched pages, at most `max_pages`
    pub pages: Vec<PageRecord>,

    /// Targets that were popped but not fetched successfully
    pub skipped: Vec<SkippedPage>,
}

impl CrawlOutput {
    /// Number of skipped targets with the given reason
    pub fn skipped_with(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}
