//! Pulse main entry point
//!
//! This is the command-line interface for the Pulse documentation module extractor.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pulse::config::{load_config_with_hash, validate, Config};
use pulse::output::{print_statistics, to_records, write_records, write_stats_json, OutputFormat};
use pulse::pipeline::run_pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pulse: documentation module extractor
///
/// Pulse crawls documentation sites, infers a tree of modules and
/// submodules from their headings and describes each one with sentences
/// taken verbatim from the crawled pages.
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(version = "1.0.0")]
#[command(about = "Extract documentation modules from help sites", long_about = None)]
struct Cli {
    /// Seed URLs to crawl (added to any seeds in the config file)
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum crawl depth
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Maximum number of pages to fetch
    #[arg(short = 'p', long)]
    max_pages: Option<u32>,

    /// Delay between requests in seconds
    #[arg(long)]
    delay: Option<f64>,

    /// Also crawl subdomains of the seed hosts
    #[arg(long)]
    include_subdomains: bool,

    /// Ignore robots.txt
    #[arg(long)]
    ignore_robots: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Also write run statistics as JSON to this file
    #[arg(long, value_name = "FILE")]
    stats_json: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    format: FormatArg,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config, &output_path(&config, &cli));
        return Ok(());
    }

    handle_run(&config, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pulse=info,warn"),
            1 => EnvFilter::new("pulse=debug,info"),
            2 => EnvFilter::new("pulse=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line values on top of the file configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    config.seeds.extend(cli.urls.iter().cloned());

    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay) = cli.delay {
        config.crawler.delay = delay;
    }
    if cli.include_subdomains {
        config.crawler.include_subdomains = true;
    }
    if cli.ignore_robots {
        config.crawler.respect_robots = false;
    }
    if cli.pretty {
        config.output.pretty = true;
    }
    if let Some(output) = &cli.output {
        config.output.path = output.display().to_string();
    }
}

/// Resolves the output path; markdown output swaps a `.json` extension for `.md`
fn output_path(config: &Config, cli: &Cli) -> PathBuf {
    let path = PathBuf::from(&config.output.path);
    let is_json = path.extension().is_some_and(|ext| ext == "json");

    if cli.output.is_none() && cli.format == FormatArg::Markdown && is_json {
        path.with_extension("md")
    } else {
        path
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config, output: &std::path::Path) {
    println!("=== Pulse Dry Run ===\n");

    println!("Seeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Delay: {}s", config.crawler.delay);
    println!("  Timeout: {}s", config.crawler.timeout);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Respect robots.txt: {}", config.crawler.respect_robots);
    println!("  Include subdomains: {}", config.crawler.include_subdomains);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nHeuristics:");
    println!("  Min block length: {}", config.extractor.min_block_length);
    println!("  H1 page fraction: {}", config.inference.h1_page_fraction);
    println!("  Max sentences: {}", config.summarizer.max_sentences);
    println!("  Max description chars: {}", config.summarizer.max_chars);
    println!(
        "  Similarity threshold: {}",
        config.summarizer.similarity_threshold
    );

    println!("\nOutput:");
    println!("  Path: {}", output.display());
    println!("  Pretty: {}", config.output.pretty);

    println!("\n✓ Configuration is valid");
}

/// Handles the main extraction run
async fn handle_run(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    tracing::info!("Total seed URLs: {}", config.seeds.len());

    let report = run_pipeline(config).await.context("pipeline failed")?;
    let records = to_records(&report.result);

    let path = output_path(config, cli);
    write_records(&records, &path, cli.format.into(), config.output.pretty)
        .with_context(|| format!("failed to write output to {}", path.display()))?;

    if let Some(stats_path) = &cli.stats_json {
        write_stats_json(&report.stats, stats_path)
            .with_context(|| format!("failed to write statistics to {}", stats_path.display()))?;
    }

    if !cli.quiet {
        print_statistics(&report.stats);
        println!(
            "\n✓ Extracted {} module(s) to {}",
            records.len(),
            path.display()
        );
    }

    Ok(())
}
