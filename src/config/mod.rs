//! Configuration module for Pulse
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an empty file (or no file at all) is a valid
//! configuration once seed URLs are supplied.
//!
//! # Example
//!
//! ```no_run
//! use pulse::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pulse.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ExtractorConfig, InferenceConfig, OutputConfig, SummarizerConfig,
    UserAgentConfig, MAX_DELAY_SECS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
