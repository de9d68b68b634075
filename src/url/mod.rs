//! URL handling module for Pulse
//!
//! This module provides URL normalization, domain extraction, wildcard
//! matching, crawl scope checks and path filters.

mod domain;
mod filter;
mod matcher;
mod normalize;
mod scope;

pub use domain::{extract_domain, site_host};
pub use filter::{has_non_html_extension, is_blacklisted_path};
pub use matcher::matches_wildcard;
pub use normalize::normalize_url;
pub use scope::CrawlScope;
