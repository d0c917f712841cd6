//! Infobox field extraction
//!
//! Each field of a site's data-source map is looked up with the strategy its
//! kind selects. A field whose locator finds nothing is simply left out of
//! the result.

use crate::config::{Field, FieldKind, FieldMap};
use crate::crawler::layout::{DATA_SOURCE_ATTR, INFOBOX_VALUE};
use crate::crawler::{parse_selector, Document, PageFetcher};
use crate::extract::normalize::strip_annotations;
use crate::output::{FailureStage, FieldData, FieldValue, ScrapeFailure};
use crate::ScrapeError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use scraper::{ElementRef, Node};
use url::Url;

/// Synchronous part of an infobox extraction
///
/// Text fields are final; image sources still need resolving (kept as URLs
/// or encoded) before they become the `images` field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoboxData {
    pub fields: FieldData,
    pub image_sources: Option<Vec<Url>>,
}

/// Extracts every mapped field from a character page
pub fn extract_infobox(document: &Document, fields: &FieldMap) -> InfoboxData {
    let mut data = InfoboxData::default();

    for (field, locator) in fields {
        let locator = locator.trim();
        if locator.is_empty() {
            continue;
        }

        match field.kind() {
            FieldKind::Text => match extract_text_field(document, locator) {
                Some(text) => {
                    data.fields.insert(*field, FieldValue::Text(text));
                }
                None => tracing::debug!(
                    "Field '{}' (locator '{}') not found on {}",
                    field,
                    locator,
                    document.url()
                ),
            },
            FieldKind::ImageList => {
                data.image_sources = Some(collect_image_sources(document, locator));
            }
        }
    }

    data
}

/// Reads the value cell of the infobox row keyed by `locator`
///
/// Inline markup is read as plain text content; a `<br>` becomes a space so
/// the lines it separates stay apart.
pub fn extract_text_field(document: &Document, locator: &str) -> Option<String> {
    let row_selector = parse_selector(&format!(
        "[{}=\"{}\"]",
        DATA_SOURCE_ATTR,
        locator.replace('\\', "\\\\").replace('"', "\\\"")
    ))?;
    let value_selector = parse_selector(INFOBOX_VALUE)?;

    let row = document.select_first(&row_selector)?;
    let value = row.select(&value_selector).next()?;
    let text = strip_annotations(&value_text(value));

    (!text.is_empty()).then_some(text)
}

fn value_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(chunk) => text.push_str(chunk),
            Node::Element(inner) if inner.name() == "br" => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Collects the `src` of every element carrying the locator's class
///
/// Elements without a usable `src` are logged and skipped.
pub fn collect_image_sources(document: &Document, locator: &str) -> Vec<Url> {
    let css: String = locator
        .split_whitespace()
        .map(|class| format!(".{}", class))
        .collect();
    let Some(selector) = parse_selector(&css) else {
        return Vec::new();
    };

    document
        .select_all(&selector)
        .filter_map(|image| match image.value().attr("src") {
            Some(src) => {
                let resolved = document.resolve(src);
                if resolved.is_none() {
                    tracing::warn!("Skipping image with unusable src '{}' on {}", src, document.url());
                }
                resolved
            }
            None => {
                tracing::warn!("Skipping image without src on {}", document.url());
                None
            }
        })
        .collect()
}

/// Extracts infobox fields, fetching images when they must be encoded
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    fetcher: PageFetcher,
}

impl FieldExtractor {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self { fetcher }
    }

    /// Extracts all mapped fields from a document
    ///
    /// # Returns
    ///
    /// The extracted fields plus one failure per image that could not be
    /// encoded; those images are left out of the `images` field.
    pub async fn extract(
        &self,
        document: &Document,
        fields: &FieldMap,
        base64: bool,
    ) -> (FieldData, Vec<ScrapeFailure>) {
        let infobox = extract_infobox(document, fields);
        self.finish(infobox, base64).await
    }

    /// Turns image sources into the final `images` field
    pub async fn finish(&self, infobox: InfoboxData, base64: bool) -> (FieldData, Vec<ScrapeFailure>) {
        let InfoboxData {
            mut fields,
            image_sources,
        } = infobox;
        let mut failures = Vec::new();

        if let Some(sources) = image_sources {
            let (images, image_failures) = self.resolve_images(sources, base64).await;
            fields.insert(Field::Images, FieldValue::Images(images));
            failures.extend(image_failures);
        }

        (fields, failures)
    }

    /// Keeps image URLs as they are, or replaces each with its base64 payload
    pub async fn resolve_images(
        &self,
        sources: Vec<Url>,
        base64: bool,
    ) -> (Vec<String>, Vec<ScrapeFailure>) {
        if !base64 {
            return (sources.into_iter().map(String::from).collect(), Vec::new());
        }

        let mut images = Vec::with_capacity(sources.len());
        let mut failures = Vec::new();
        for source in sources {
            match self.convert_image_to_base64(&source).await {
                Ok(encoded) => images.push(encoded),
                Err(e) => failures.push(ScrapeFailure::new(
                    FailureStage::Image,
                    Some(source.as_str()),
                    e,
                )),
            }
        }

        (images, failures)
    }

    /// Fetches an image and encodes its bytes as standard base64
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Base64 of the exact response bytes
    /// * `Err(ScrapeError)` - The image could not be fetched
    pub async fn convert_image_to_base64(&self, url: &Url) -> Result<String, ScrapeError> {
        let bytes = self.fetcher.fetch_bytes(url).await?;
        Ok(BASE64.encode(bytes))
    }
}
