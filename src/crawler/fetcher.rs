//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the HTTP client with user agent and timeouts
//! - GET requests for listing pages, character pages and images
//! - Classifying failures into timeout, status and transport errors
//! - Parsing HTML bodies into navigable documents

use crate::config::ClientConfig;
use crate::ScrapeError;
use reqwest::{Client, Response};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

/// Body of a fetched page together with the URL it was served from
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Final URL after redirects
    pub url: Url,
    /// Response body
    pub body: String,
}

/// Parsed HTML page anchored at the URL it came from
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    /// Parses an HTML body; relative links resolve against `url`
    pub fn parse(body: &str, url: Url) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Returns the first element matching the selector
    pub fn select_first<'a>(&'a self, selector: &Selector) -> Option<ElementRef<'a>> {
        self.html.select(selector).next()
    }

    /// Returns every element matching the selector, in document order
    pub fn select_all<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector)
    }

    /// Resolves an href or src found on this page
    pub fn resolve(&self, href: &str) -> Option<Url> {
        crate::url::resolve_href(&self.url, href)
    }

    /// Returns the text of every inline `<script>` element
    pub fn script_texts(&self) -> Vec<String> {
        parse_selector("script")
            .map(|selector| {
                self.html
                    .select(&selector)
                    .map(|script| script.text().collect::<String>())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("url", &self.url.as_str()).finish()
    }
}

/// Parses a CSS selector, logging instead of failing on bad input
///
/// Locators come from site configuration, so a bad one only disables the
/// lookup it was meant for.
pub fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use fandom_harvest::config::ClientConfig;
/// use fandom_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&ClientConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Retrieves pages and images over HTTP
///
/// Each call is one independent attempt bounded by the client timeouts;
/// there is no retry and no caching.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a fetcher with a client built from the configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ScrapeError> {
        Ok(Self::from_client(build_http_client(config)?))
    }

    /// Wraps an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a URL and parses the body as HTML
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - Parsed page anchored at the final URL
    /// * `Err(ScrapeError)` - Transport failure, timeout or non-2xx status
    pub async fn fetch(&self, url: &Url) -> Result<Document, ScrapeError> {
        let page = self.fetch_raw(url).await?;
        Ok(Document::parse(&page.body, page.url))
    }

    /// Fetches a URL and returns the body text without parsing it
    pub async fn fetch_raw(&self, url: &Url) -> Result<RawPage, ScrapeError> {
        tracing::debug!("Fetching page: {}", url);
        let response = self.get(url).await?;
        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify_error(url, e))?;

        Ok(RawPage {
            url: final_url,
            body,
        })
    }

    /// Fetches a URL and returns the raw body bytes
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, ScrapeError> {
        tracing::debug!("Fetching bytes: {}", url);
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_error(url, e))?;
        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &Url) -> Result<Response, ScrapeError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

/// Maps a reqwest error onto the crate's fetch errors
fn classify_error(url: &Url, error: reqwest::Error) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::Timeout {
            url: url.to_string(),
        }
    } else {
        ScrapeError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_document_resolves_relative_links() {
        let url = Url::parse("https://naruto.fandom.com/wiki/Category:Characters").unwrap();
        let document = Document::parse("<html><body></body></html>", url);

        let resolved = document.resolve("/wiki/Sasuke_Uchiha").unwrap();
        assert_eq!(resolved.as_str(), "https://naruto.fandom.com/wiki/Sasuke_Uchiha");
    }

    #[test]
    fn test_script_texts() {
        let url = Url::parse("https://naruto.fandom.com/wiki/A").unwrap();
        let document = Document::parse(
            r#"<html><head><script>var a = 1;</script></head><body><script>var b = 2;</script></body></html>"#,
            url,
        );
        assert_eq!(document.script_texts(), vec!["var a = 1;", "var b = 2;"]);
    }

    #[test]
    fn test_invalid_selector_is_none() {
        assert!(parse_selector("[[[").is_none());
        assert!(parse_selector("a.category-page__member-link").is_some());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_fetch_error() {
        let fetcher = PageFetcher::new(&ClientConfig {
            connect_timeout_secs: 1,
            request_timeout_secs: 1,
            ..ClientConfig::default()
        })
        .unwrap();
        let url = Url::parse("http://127.0.0.1:9/").unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(err.is_fetch());
        assert_eq!(err.url(), Some("http://127.0.0.1:9/"));
    }
}
