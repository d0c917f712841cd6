//! Fandom-Harvest: character data extraction for fandom-style wikis
//!
//! This crate walks the paginated character index of a wiki built on the
//! "classic" category template, follows each listed entry to its own page and
//! pulls infobox fields, images and the embedded page id into structured
//! records.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Fandom-Harvest operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Unknown site '{name}' for language '{language}'")]
    UnknownSite { name: String, language: String },

    #[error("Invalid scrape options: {0}")]
    InvalidOptions(String),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("{0}")]
    MalformedEntry(#[from] MalformedEntry),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ScrapeError {
    /// Returns true for transport and HTTP failures
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Status { .. } | Self::Timeout { .. }
        )
    }

    /// Returns the URL the error is about, when there is one
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Http { url, .. } | Self::Status { url, .. } | Self::Timeout { url } => Some(url),
            Self::MalformedEntry(entry) => Some(&entry.page),
            _ => None,
        }
    }
}

/// A listing row that lacks the link or the display name it needs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed listing entry #{position} on {page}: {reason}")]
pub struct MalformedEntry {
    /// Listing page the row was found on
    pub page: String,
    /// Position of the row among the page's surviving rows (0-based)
    pub position: usize,
    /// What was missing
    pub reason: String,
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

/// Result type alias for Fandom-Harvest operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{ClientConfig, Field, FieldKind, FieldMap, PageLayout, SchemaRegistry, SiteSchema};
pub use crawler::{Document, ListEntry, ListingPage, ListingWalker, PageFetcher, ScrapeOptions, Scraper};
pub use output::{CharacterRecord, FailureStage, FieldValue, ListingCount, ScrapeFailure, ScrapeReport};
pub use state::ListingState;
