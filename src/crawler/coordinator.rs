//! Scrape coordinator - main extraction orchestration logic
//!
//! This module ties the listing walker, the page fetcher and the field
//! extractor together:
//! - Resolving a site schema at construction
//! - Validating scrape options before any network activity
//! - Applying offset and limit over the filtered listing
//! - Collecting records and non-fatal failures into a report

use crate::config::{ClientConfig, PageLayout, SchemaRegistry, SiteSchema};
use crate::crawler::fetcher::{Document, PageFetcher};
use crate::crawler::listing::{ListEntry, ListingPage, ListingWalker};
use crate::extract::{extract_infobox, extract_page_id, FieldExtractor};
use crate::output::{
    CharacterRecord, FailureStage, ListingCount, ScrapeFailure, ScrapeReport,
};
use crate::url::wiki_page_url;
use crate::ScrapeError;
use std::sync::Arc;
use url::Url;

/// Options for a scrape run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Number of filtered listing entries to skip
    pub offset: usize,
    /// Maximum number of records to emit
    pub limit: usize,
    /// Extract infobox data from each character page
    pub recursive: bool,
    /// Replace image URLs with base64 payloads
    pub base64: bool,
    /// Read the page id embedded in each character page
    pub with_id: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100_000,
            recursive: false,
            base64: true,
            with_id: true,
        }
    }
}

impl ScrapeOptions {
    /// Checks `limit >= 1` and `offset <= limit`
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.limit < 1 {
            return Err(ScrapeError::InvalidOptions(format!(
                "limit must be >= 1, got {}",
                self.limit
            )));
        }

        if self.offset > self.limit {
            return Err(ScrapeError::InvalidOptions(format!(
                "offset ({}) must not exceed limit ({})",
                self.offset, self.limit
            )));
        }

        Ok(())
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_base64(mut self, base64: bool) -> Self {
        self.base64 = base64;
        self
    }

    pub fn with_id(mut self, with_id: bool) -> Self {
        self.with_id = with_id;
        self
    }
}

/// Character scraper for one site
pub struct Scraper {
    schema: Arc<SiteSchema>,
    fetcher: PageFetcher,
    extractor: FieldExtractor,
    current_page: Option<ListingPage>,
}

impl Scraper {
    /// Creates a scraper for a built-in site
    ///
    /// # Arguments
    ///
    /// * `name` - Fiction identifier (e.g. "naruto")
    /// * `language` - Wiki language; defaults to English
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Ready to scrape
    /// * `Err(ScrapeError::UnknownSite)` - No schema for (name, language)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fandom_harvest::crawler::{ScrapeOptions, Scraper};
    ///
    /// # async fn example() -> fandom_harvest::Result<()> {
    /// let mut scraper = Scraper::new("naruto", None)?;
    /// let report = scraper
    ///     .get_all(ScrapeOptions::default().with_limit(10).with_recursive(true))
    ///     .await?;
    /// for record in &report.records {
    ///     println!("{} -> {:?}", record.name, record.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(name: &str, language: Option<&str>) -> Result<Self, ScrapeError> {
        Self::with_registry(SchemaRegistry::builtin(), name, language, &ClientConfig::default())
    }

    /// Creates a scraper resolving the site in the given registry
    pub fn with_registry(
        registry: &SchemaRegistry,
        name: &str,
        language: Option<&str>,
        client: &ClientConfig,
    ) -> Result<Self, ScrapeError> {
        let schema = registry.get(name, language)?;
        Self::from_schema(schema, client)
    }

    /// Creates a scraper for an already resolved schema
    pub fn from_schema(schema: Arc<SiteSchema>, client: &ClientConfig) -> Result<Self, ScrapeError> {
        let fetcher = PageFetcher::new(client)?;
        Ok(Self {
            schema,
            extractor: FieldExtractor::new(fetcher.clone()),
            fetcher,
            current_page: None,
        })
    }

    pub fn schema(&self) -> &SiteSchema {
        &self.schema
    }

    /// The listing page most recently loaded by `get_all` or `count`
    pub fn current_page(&self) -> Option<&ListingPage> {
        self.current_page.as_ref()
    }

    /// Fetches and parses an arbitrary page
    pub async fn fetch_page(&self, url: &str) -> Result<Document, ScrapeError> {
        let url = Url::parse(url)?;
        self.fetcher.fetch(&url).await
    }

    /// Scrapes characters from the site's listing
    ///
    /// # Returns
    ///
    /// * `Ok(ScrapeReport)` - Records in listing order, at most `options.limit`,
    ///   plus every non-fatal failure met on the way
    /// * `Err(ScrapeError::InvalidOptions)` - Options rejected before any request
    pub async fn get_all(&mut self, options: ScrapeOptions) -> Result<ScrapeReport, ScrapeError> {
        options.validate()?;

        let mut report = ScrapeReport::start();
        match self.schema.layout {
            PageLayout::Classic => self.scrape_classic(&options, &mut report).await,
            layout => {
                tracing::warn!(
                    "Layout {} of {} ({}) is not supported; nothing scraped",
                    layout,
                    self.schema.name,
                    self.schema.language
                );
            }
        }

        let report = report.finish();
        tracing::info!(
            "Scraped {} records from {} ({}) with {} failures in {}ms",
            report.records.len(),
            self.schema.name,
            self.schema.language,
            report.failures.len(),
            report.duration().num_milliseconds()
        );
        Ok(report)
    }

    async fn scrape_classic(&mut self, options: &ScrapeOptions, report: &mut ScrapeReport) {
        let Some(mut walker) = self.walker(report) else {
            return;
        };

        let mut seen = 0usize;
        while let Some(item) = walker.next_entry().await {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    record_listing_error(report, e);
                    continue;
                }
            };

            // Offset counts well-formed survivors of the ban list
            seen += 1;
            if seen <= options.offset {
                tracing::trace!("Skipping {} (offset {})", entry.name, options.offset);
                continue;
            }

            // Fetch and extract the character page
            let mut failures = Vec::new();
            match self.scrape_entry(&entry, options, &mut failures).await {
                Ok(record) => {
                    report.records.push(record);
                }
                Err(e) => failures.push(ScrapeFailure::new(
                    FailureStage::Entry,
                    Some(entry.url.as_str()),
                    e,
                )),
            }
            for failure in failures {
                report.push_failure(failure);
            }

            // Stop mid-page once the limit is hit
            if report.records.len() >= options.limit {
                tracing::debug!("Limit of {} records reached", options.limit);
                break;
            }
        }

        self.current_page = walker.into_current_page();
    }

    /// Counts filtered listing entries without visiting character pages
    pub async fn count(&mut self) -> Result<ListingCount, ScrapeError> {
        let mut report = ScrapeReport::start();
        let mut total = 0usize;

        if self.schema.layout.is_supported() {
            if let Some(mut walker) = self.walker(&mut report) {
                while let Some(item) = walker.next_entry().await {
                    match item {
                        Ok(_) => total += 1,
                        Err(e) => record_listing_error(&mut report, e),
                    }
                }
                self.current_page = walker.into_current_page();
            }
        } else {
            tracing::warn!("Layout {} is not supported; nothing counted", self.schema.layout);
        }

        Ok(ListingCount {
            total,
            failures: report.failures,
        })
    }

    /// Scrapes a single character by page title
    ///
    /// Offset and limit are ignored; the other options apply as in `get_all`.
    /// Image encoding failures are logged and the images left out.
    pub async fn find_by_name(
        &self,
        name: &str,
        options: ScrapeOptions,
    ) -> Result<CharacterRecord, ScrapeError> {
        let entry = ListEntry {
            url: wiki_page_url(&self.schema.base_url, name)?,
            name: name.trim().to_string(),
        };

        let mut failures = Vec::new();
        let record = self.scrape_entry(&entry, &options, &mut failures).await?;
        for failure in failures {
            tracing::warn!(
                "{} failure for {}: {}",
                failure.stage,
                failure.url.as_deref().unwrap_or(entry.url.as_str()),
                failure.message
            );
        }
        Ok(record)
    }

    fn walker(&self, report: &mut ScrapeReport) -> Option<ListingWalker> {
        match Url::parse(&self.schema.listing_url) {
            Ok(start) => Some(ListingWalker::new(self.fetcher.clone(), start)),
            Err(e) => {
                report.push_failure(ScrapeFailure::new(
                    FailureStage::Listing,
                    Some(self.schema.listing_url.as_str()),
                    e,
                ));
                None
            }
        }
    }

    /// Fetches one character page and builds its record
    async fn scrape_entry(
        &self,
        entry: &ListEntry,
        options: &ScrapeOptions,
        failures: &mut Vec<ScrapeFailure>,
    ) -> Result<CharacterRecord, ScrapeError> {
        tracing::debug!("Scraping {} ({})", entry.name, entry.url);
        let raw = self.fetcher.fetch_raw(&entry.url).await?;

        // Parse and read everything synchronous before the next await
        let (infobox, id) = {
            let document = Document::parse(&raw.body, raw.url);
            let infobox = options
                .recursive
                .then(|| extract_infobox(&document, &self.schema.data_source));
            let id = options.with_id.then(|| extract_page_id(&document));
            (infobox, id)
        };

        // Resolve or encode images
        let data = match infobox {
            Some(infobox) => {
                let (fields, image_failures) = self.extractor.finish(infobox, options.base64).await;
                failures.extend(image_failures);
                Some(fields)
            }
            None => None,
        };

        Ok(CharacterRecord {
            url: entry.url.to_string(),
            name: entry.name.clone(),
            id,
            data,
        })
    }
}

fn record_listing_error(report: &mut ScrapeReport, error: ScrapeError) {
    let stage = match error {
        ScrapeError::MalformedEntry(_) => FailureStage::Malformed,
        _ => FailureStage::Listing,
    };
    let url = error.url().map(str::to_string);
    report.push_failure(ScrapeFailure::new(stage, url.as_deref(), error));
}
