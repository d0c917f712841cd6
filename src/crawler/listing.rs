//! Paginated listing traversal
//!
//! A listing is the category index of a wiki. Each page lists character links
//! and may carry a "next" control; the walker follows those controls until
//! none is left, yielding entries one at a time so a caller can stop early.

use crate::crawler::fetcher::{parse_selector, Document, PageFetcher};
use crate::crawler::layout::{BANNED_SUBSTRINGS, LISTING_ITEM, NEXT_PAGE};
use crate::state::ListingState;
use crate::{MalformedEntry, ScrapeError};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// One row of the character index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// Absolute URL of the character page
    pub url: Url,
    /// Display name as shown in the listing
    pub name: String,
}

/// A parsed listing page
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// URL the page was loaded from
    pub url: Url,
    /// Rows that survived the ban list, in document order
    pub items: Vec<Result<ListEntry, MalformedEntry>>,
    /// Target of the "next" control, if any
    pub next_url: Option<Url>,
}

impl ListingPage {
    /// Extracts entries and the next-page link from a listing document
    pub fn parse(document: &Document) -> Self {
        let page = document.url().to_string();
        let mut items = Vec::new();

        if let Some(selector) = parse_selector(LISTING_ITEM) {
            let survivors = document
                .select_all(&selector)
                .filter(|element| !is_banned(&element.text().collect::<String>()));

            for (position, element) in survivors.enumerate() {
                let text = element.text().collect::<String>();
                let name = text.trim();
                let href = element.value().attr("href");

                let item = match (href, name.is_empty()) {
                    (None, _) => Err(malformed(&page, position, "missing href")),
                    (Some(_), true) => Err(malformed(&page, position, "missing name")),
                    (Some(href), false) => match document.resolve(href) {
                        Some(url) => Ok(ListEntry {
                            url,
                            name: name.to_string(),
                        }),
                        None => Err(malformed(
                            &page,
                            position,
                            &format!("unusable href '{}'", href),
                        )),
                    },
                };
                items.push(item);
            }
        }

        let next_url = parse_selector(NEXT_PAGE)
            .and_then(|selector| document.select_first(&selector))
            .and_then(|next| next.value().attr("href"))
            .and_then(|href| document.resolve(href));

        Self {
            url: document.url().clone(),
            items,
            next_url,
        }
    }

    /// Returns the well-formed entries of this page
    pub fn entries(&self) -> impl Iterator<Item = &ListEntry> {
        self.items.iter().filter_map(|item| item.as_ref().ok())
    }
}

fn malformed(page: &str, position: usize, reason: &str) -> MalformedEntry {
    MalformedEntry {
        page: page.to_string(),
        position,
        reason: reason.to_string(),
    }
}

/// Returns true if a listing row's text marks it as a non-character entry
///
/// The comparison is case-insensitive.
pub fn is_banned(text: &str) -> bool {
    let lowered = text.to_lowercase();
    BANNED_SUBSTRINGS
        .iter()
        .any(|banned| lowered.contains(banned))
}

/// Incremental walker over a paginated listing
///
/// # Example
///
/// ```no_run
/// use fandom_harvest::config::ClientConfig;
/// use fandom_harvest::crawler::{ListingWalker, PageFetcher};
/// use url::Url;
///
/// # async fn example() -> fandom_harvest::Result<()> {
/// let fetcher = PageFetcher::new(&ClientConfig::default())?;
/// let start = Url::parse("https://naruto.fandom.com/wiki/Category:Characters")?;
/// let mut walker = ListingWalker::new(fetcher, start);
/// while let Some(entry) = walker.next_entry().await {
///     println!("{}", entry?.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ListingWalker {
    fetcher: PageFetcher,
    state: ListingState,
    next_url: Option<Url>,
    queue: VecDeque<Result<ListEntry, MalformedEntry>>,
    current: Option<ListingPage>,
    visited: HashSet<Url>,
}

impl ListingWalker {
    /// Creates a walker that will start at `start`
    pub fn new(fetcher: PageFetcher, start: Url) -> Self {
        Self {
            fetcher,
            state: ListingState::NotStarted,
            next_url: Some(start),
            queue: VecDeque::new(),
            current: None,
            visited: HashSet::new(),
        }
    }

    /// Where the walk currently is
    pub fn state(&self) -> ListingState {
        self.state
    }

    /// Number of listing pages loaded so far
    pub fn pages_loaded(&self) -> usize {
        self.visited.len()
    }

    /// The most recently loaded listing page
    pub fn current_page(&self) -> Option<&ListingPage> {
        self.current.as_ref()
    }

    pub fn into_current_page(self) -> Option<ListingPage> {
        self.current
    }

    /// Yields the next listing entry
    ///
    /// # Returns
    ///
    /// * `Some(Ok(entry))` - Next entry in pagination then document order
    /// * `Some(Err(MalformedEntry))` - A row without link or name; walking continues
    /// * `Some(Err(fetch error))` - A listing page failed to load; the walker is exhausted
    /// * `None` - No more entries
    pub async fn next_entry(&mut self) -> Option<Result<ListEntry, ScrapeError>> {
        loop {
            // Drain the rows of the current page first
            if let Some(item) = self.queue.pop_front() {
                return Some(item.map_err(ScrapeError::from));
            }

            if self.state.is_terminal() {
                return None;
            }

            let Some(url) = self.next_url.take() else {
                tracing::debug!("Listing has no further page");
                self.transition(ListingState::Exhausted);
                return None;
            };

            // Guard against "next" links that cycle
            if !self.visited.insert(url.clone()) {
                tracing::warn!("Listing pagination loops back to {}; stopping", url);
                self.transition(ListingState::Exhausted);
                return None;
            }

            if let Err(e) = self.load(url).await {
                self.transition(ListingState::Exhausted);
                return Some(Err(e));
            }
        }
    }

    async fn load(&mut self, url: Url) -> Result<(), ScrapeError> {
        let raw = self.fetcher.fetch_raw(&url).await?;
        let page = ListingPage::parse(&Document::parse(&raw.body, raw.url));

        tracing::debug!(
            "Loaded listing page {} ({} rows, next: {})",
            page.url,
            page.items.len(),
            page.next_url
                .as_ref()
                .map(Url::as_str)
                .unwrap_or("none")
        );

        // Queue rows, remember where to go next
        self.queue.extend(page.items.iter().cloned());
        self.next_url = page.next_url.clone();
        self.current = Some(page);
        self.transition(ListingState::HasPage);
        Ok(())
    }

    fn transition(&mut self, next: ListingState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid listing transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!("Listing state {} -> {}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(body: &str) -> Document {
        Document::parse(
            body,
            Url::parse("https://naruto.fandom.com/wiki/Category:Characters").unwrap(),
        )
    }

    #[test]
    fn test_is_banned_case_insensitive() {
        assert!(is_banned("Category:Akatsuki"));
        assert!(is_banned("CATEGORY:Hokage"));
        assert!(is_banned("List of Jutsu"));
        assert!(!is_banned("Kakashi Hatake"));
    }

    #[test]
    fn test_parse_entries_in_order() {
        let page = ListingPage::parse(&document(
            r#"<html><body>
            <a class="category-page__member-link" href="/wiki/Naruto_Uzumaki">Naruto Uzumaki</a>
            <a class="category-page__member-link" href="/wiki/Category:Akatsuki">Category:Akatsuki</a>
            <a class="category-page__member-link" href="/wiki/Sakura_Haruno"> Sakura Haruno </a>
            </body></html>"#,
        ));

        let names: Vec<_> = page.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Naruto Uzumaki", "Sakura Haruno"]);
        assert_eq!(
            page.entries().next().unwrap().url.as_str(),
            "https://naruto.fandom.com/wiki/Naruto_Uzumaki"
        );
        assert!(page.next_url.is_none());
    }

    #[test]
    fn test_parse_malformed_rows() {
        let page = ListingPage::parse(&document(
            r#"<html><body>
            <a class="category-page__member-link">No Link</a>
            <a class="category-page__member-link" href="/wiki/Blank">   </a>
            <a class="category-page__member-link" href="/wiki/Ok">Ok</a>
            </body></html>"#,
        ));

        assert_eq!(page.items.len(), 3);
        let errors: Vec<_> = page
            .items
            .iter()
            .filter_map(|item| item.as_ref().err())
            .collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].position, 0);
        assert_eq!(errors[0].reason, "missing href");
        assert_eq!(errors[1].reason, "missing name");
        assert_eq!(page.entries().count(), 1);
    }

    #[test]
    fn test_parse_next_link() {
        let page = ListingPage::parse(&document(
            r#"<html><body>
            <a class="category-page__pagination-next" href="?from=Kakashi">Next</a>
            </body></html>"#,
        ));
        assert_eq!(
            page.next_url.unwrap().as_str(),
            "https://naruto.fandom.com/wiki/Category:Characters?from=Kakashi"
        );
    }

    #[test]
    fn test_next_link_without_href() {
        let page = ListingPage::parse(&document(
            r#"<html><body><a class="category-page__pagination-next">Next</a></body></html>"#,
        ));
        assert!(page.next_url.is_none());
    }
}
