//! Pulse: documentation module extraction
//!
//! This crate crawls documentation sites, strips boilerplate from each page,
//! infers a two-level tree of modules and submodules from the heading structure
//! and describes every node with sentences taken verbatim from the crawled text.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod inference;
pub mod output;
pub mod pipeline;
pub mod robots;
pub mod summarize;
pub mod url;

use thiserror::Error;

/// Main error type for Pulse operations
///
/// Per-page crawl failures are not errors; they are recorded as
/// [`crawler::SkipReason`] values and the crawl continues.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for Pulse operations
pub type Result<T> = std::result::Result<T, PulseError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOutput, PageRecord, SkipReason};
pub use extract::{extract, BlockKind, ContentBlock};
pub use inference::{infer, ExtractionResult, ModuleNode, SubmoduleNode};
pub use pipeline::{run_pipeline, PipelineReport};
pub use summarize::Summarizer;
pub use url::normalize_url;
