//! Crawler module for listing traversal and page retrieval
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching and HTML parsing
//! - Walking the paginated character listing
//! - Orchestrating per-entry extraction under offset/limit options

mod coordinator;
mod fetcher;
pub(crate) mod layout;
mod listing;

pub use coordinator::{ScrapeOptions, Scraper};
pub use fetcher::{build_http_client, parse_selector, Document, PageFetcher, RawPage};
pub use listing::{is_banned, ListEntry, ListingPage, ListingWalker};

use crate::config::SchemaRegistry;
use crate::output::ScrapeReport;
use crate::ScrapeError;

/// Runs a complete scrape of a built-in site
///
/// This is a shortcut for constructing a `Scraper` and calling `get_all`.
///
/// # Arguments
///
/// * `name` - Fiction identifier
/// * `language` - Wiki language; defaults to English
/// * `options` - Offset, limit and extraction switches
///
/// # Returns
///
/// * `Ok(ScrapeReport)` - Records and non-fatal failures
/// * `Err(ScrapeError)` - Unknown site or invalid options
pub async fn scrape(
    name: &str,
    language: Option<&str>,
    options: ScrapeOptions,
) -> Result<ScrapeReport, ScrapeError> {
    let mut scraper = Scraper::with_registry(
        SchemaRegistry::builtin(),
        name,
        language,
        &Default::default(),
    )?;
    scraper.get_all(options).await
}
