use serde::Deserialize;
use std::time::Duration;

/// Largest accepted politeness delay (seconds)
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Main configuration structure for Pulse
///
/// Every section is optional in the TOML file; missing keys take the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed URLs; they also establish the allowed domain set
    pub seeds: Vec<String>,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub extractor: ExtractorConfig,
    pub inference: InferenceConfig,
    pub summarizer: SummarizerConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of link hops from a seed URL
    pub max_depth: u32,

    /// Maximum number of successfully fetched pages
    pub max_pages: u32,

    /// Politeness delay between requests (seconds)
    pub delay: f64,

    /// Request timeout (seconds)
    pub timeout: u64,

    /// Retries for timeouts, HTTP 429 and HTTP 5xx
    pub max_retries: u32,

    /// Maximum redirect hops followed per request
    pub max_redirects: u32,

    /// Whether robots.txt rules are consulted
    pub respect_robots: bool,

    /// Whether subdomains of a seed host are in scope
    pub include_subdomains: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_pages: 100,
            delay: 0.5,
            timeout: 10,
            max_retries: 2,
            max_redirects: 10,
            respect_robots: true,
            include_subdomains: false,
        }
    }
}

impl CrawlerConfig {
    /// The politeness delay as a `Duration`
    pub fn delay_duration(&self) -> Duration {
        if self.delay.is_finite() && self.delay > 0.0 {
            Duration::try_from_secs_f64(self.delay).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the crawler
    pub crawler_name: String,

    /// Version of the crawler
    pub crawler_version: String,

    /// URL with information about the crawler
    pub contact_url: String,

    /// Email address for crawler-related contact (optional)
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "Pulse-Crawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://github.com/pulse-crawler".to_string(),
            contact_email: String::new(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`, with the
    /// email part omitted when no contact email is configured.
    pub fn header_value(&self) -> String {
        if self.contact_email.is_empty() {
            format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, self.contact_url
            )
        } else {
            format!(
                "{}/{} (+{}; {})",
                self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
            )
        }
    }
}

/// Content extraction thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExtractorConfig {
    /// Paragraph and list-item blocks shorter than this (in characters) are noise
    pub min_block_length: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_block_length: 20,
        }
    }
}

/// Hierarchy inference thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InferenceConfig {
    /// Fraction of heading-bearing pages that must carry an H1 for H1 to be
    /// the module level
    pub h1_page_fraction: f64,

    /// Cleaned heading names are truncated to this many characters
    pub max_name_length: usize,

    /// Cleaned heading names shorter than this open no module or submodule
    pub min_name_length: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            h1_page_fraction: 0.5,
            max_name_length: 100,
            min_name_length: 3,
        }
    }
}

/// Extractive summarization parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SummarizerConfig {
    /// Maximum number of sentences in a description
    pub max_sentences: usize,

    /// Character budget for a description
    pub max_chars: usize,

    /// Sentences shorter than this are not candidates
    pub min_sentence_length: usize,

    /// Sentences longer than this are not candidates
    pub max_sentence_length: usize,

    /// Candidates at or above this Jaccard similarity to a selected sentence
    /// are rejected as redundant
    pub similarity_threshold: f64,

    /// Weight of the positional bonus favoring earlier sentences
    pub position_weight: f64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_sentences: 3,
            max_chars: 500,
            min_sentence_length: 20,
            max_sentence_length: 300,
            similarity_threshold: 0.6,
            position_weight: 0.5,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the JSON result file
    pub path: String,

    /// Pretty-print the JSON result
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "output.json".to_string(),
            pretty: false,
        }
    }
}
