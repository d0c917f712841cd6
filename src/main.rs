//! Fandom-Harvest main entry point
//!
//! This is the command-line interface for the Fandom-Harvest character scraper.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use fandom_harvest::config::{ClientConfig, SchemaRegistry};
use fandom_harvest::crawler::{ScrapeOptions, Scraper};
use fandom_harvest::output::{compute_statistics, print_statistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Fandom-Harvest: character data extraction for fandom wikis
///
/// Walks a wiki's character category, follows each entry to its page and
/// prints the extracted records as JSON.
#[derive(Parser, Debug)]
#[command(name = "fandom-harvest")]
#[command(version)]
#[command(about = "Character data extraction for fandom wikis", long_about = None)]
struct Cli {
    /// TOML file with extra sites and client settings
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape characters and print the report as JSON
    Scrape(ScrapeArgs),

    /// Count listed characters without visiting their pages
    Count(SiteArgs),

    /// Fetch a single character by page title
    Find {
        #[command(flatten)]
        site: SiteArgs,

        /// Page title, e.g. "Kakashi Hatake"
        #[arg(long)]
        title: String,

        /// Keep image URLs instead of embedding base64
        #[arg(long)]
        no_base64: bool,
    },

    /// List known sites
    Sites,
}

#[derive(Args, Debug)]
struct SiteArgs {
    /// Fiction identifier, e.g. "naruto"
    name: String,

    /// Wiki language code
    #[arg(short, long)]
    language: Option<String>,
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Number of listed characters to skip
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Maximum number of characters to return
    #[arg(long, default_value_t = 100_000)]
    limit: usize,

    /// Visit each character page and extract infobox fields
    #[arg(short, long)]
    recursive: bool,

    /// Keep image URLs instead of embedding base64
    #[arg(long)]
    no_base64: bool,

    /// Do not read page ids
    #[arg(long)]
    no_id: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    setup_logging(cli.verbose, cli.quiet);

    // Built-in sites plus configured ones
    let (registry, client) = load_registry(cli.config.as_deref())?;

    match cli.command {
        Command::Scrape(args) => handle_scrape(&registry, &client, args).await,
        Command::Count(site) => handle_count(&registry, &client, site).await,
        Command::Find {
            site,
            title,
            no_base64,
        } => handle_find(&registry, &client, site, &title, no_base64).await,
        Command::Sites => {
            handle_sites(&registry);
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fandom_harvest=info,warn"),
            1 => EnvFilter::new("fandom_harvest=debug,info"),
            2 => EnvFilter::new("fandom_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the registry from built-in sites plus any configured ones
fn load_registry(
    path: Option<&std::path::Path>,
) -> anyhow::Result<(SchemaRegistry, ClientConfig)> {
    let Some(path) = path else {
        return Ok((SchemaRegistry::builtin().clone(), ClientConfig::default()));
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let loaded = SchemaRegistry::from_config_file(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    Ok(loaded)
}

fn scraper_for(
    registry: &SchemaRegistry,
    client: &ClientConfig,
    site: &SiteArgs,
) -> anyhow::Result<Scraper> {
    Ok(Scraper::with_registry(
        registry,
        &site.name,
        site.language.as_deref(),
        client,
    )?)
}

/// Handles the scrape command: prints the JSON report to stdout
async fn handle_scrape(
    registry: &SchemaRegistry,
    client: &ClientConfig,
    args: ScrapeArgs,
) -> anyhow::Result<()> {
    let mut scraper = scraper_for(registry, client, &args.site)?;
    let options = ScrapeOptions::default()
        .with_offset(args.offset)
        .with_limit(args.limit)
        .with_recursive(args.recursive)
        .with_base64(!args.no_base64)
        .with_id(!args.no_id);

    // Report goes to stdout, statistics to stderr
    let report = scraper.get_all(options).await?;
    println!("{}", report.to_json()?);
    print_statistics(&compute_statistics(&report));

    Ok(())
}

/// Handles the count command
async fn handle_count(
    registry: &SchemaRegistry,
    client: &ClientConfig,
    site: SiteArgs,
) -> anyhow::Result<()> {
    let mut scraper = scraper_for(registry, client, &site)?;
    let count = scraper.count().await?;
    println!("{}", serde_json::to_string_pretty(&count)?);
    Ok(())
}

/// Handles the find command
async fn handle_find(
    registry: &SchemaRegistry,
    client: &ClientConfig,
    site: SiteArgs,
    title: &str,
    no_base64: bool,
) -> anyhow::Result<()> {
    let scraper = scraper_for(registry, client, &site)?;
    let options = ScrapeOptions::default()
        .with_recursive(true)
        .with_base64(!no_base64);

    let record = scraper.find_by_name(title, options).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Handles the sites command
fn handle_sites(registry: &SchemaRegistry) {
    for site in registry.sites() {
        println!(
            "{:<20} {:<4} {:<10} {}",
            site.name,
            site.language,
            site.layout.as_str(),
            site.listing_url
        );
    }
}
