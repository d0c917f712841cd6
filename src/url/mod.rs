//! URL helpers for Fandom-Harvest
//!
//! Listing links and image sources are frequently relative; they are resolved
//! against the URL of the page they were found on.

use url::Url;

/// Resolves an href or src to an absolute HTTP(S) URL
///
/// Returns None if the link should be ignored:
/// - empty values and fragment-only anchors
/// - javascript:, mailto:, tel: and data: schemes
/// - anything that does not resolve to http or https
///
/// # Examples
///
/// ```
/// use fandom_harvest::url::resolve_href;
/// use url::Url;
///
/// let page = Url::parse("https://naruto.fandom.com/wiki/Category:Characters").unwrap();
/// let url = resolve_href(&page, "/wiki/Kakashi_Hatake").unwrap();
/// assert_eq!(url.as_str(), "https://naruto.fandom.com/wiki/Kakashi_Hatake");
/// ```
pub fn resolve_href(base_url: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        _ => None,
    }
}

/// Builds the article URL for a page title on a wiki
///
/// Spaces become underscores, matching how MediaWiki names articles.
///
/// # Examples
///
/// ```
/// use fandom_harvest::url::wiki_page_url;
///
/// let url = wiki_page_url("https://naruto.fandom.com", "Kakashi Hatake").unwrap();
/// assert_eq!(url.as_str(), "https://naruto.fandom.com/wiki/Kakashi_Hatake");
/// ```
pub fn wiki_page_url(base_url: &str, title: &str) -> Result<Url, url::ParseError> {
    let title = title
        .trim()
        .replace(' ', "_")
        .replace('?', "%3F")
        .replace('#', "%23");
    Url::parse(&format!("{}/wiki/{}", base_url.trim_end_matches('/'), title))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://naruto.fandom.com/wiki/Category:Characters").unwrap()
    }

    #[test]
    fn test_resolve_absolute_path() {
        let url = resolve_href(&page(), "/wiki/Naruto_Uzumaki").unwrap();
        assert_eq!(url.as_str(), "https://naruto.fandom.com/wiki/Naruto_Uzumaki");
    }

    #[test]
    fn test_resolve_full_url() {
        let url = resolve_href(&page(), "https://static.wikia.nocookie.net/a.png").unwrap();
        assert_eq!(url.host_str(), Some("static.wikia.nocookie.net"));
    }

    #[test]
    fn test_resolve_protocol_relative() {
        let url = resolve_href(&page(), "//static.wikia.nocookie.net/a.png").unwrap();
        assert_eq!(url.as_str(), "https://static.wikia.nocookie.net/a.png");
    }

    #[test]
    fn test_skip_special_schemes() {
        assert!(resolve_href(&page(), "javascript:void(0)").is_none());
        assert!(resolve_href(&page(), "mailto:a@b.c").is_none());
        assert!(resolve_href(&page(), "data:image/gif;base64,R0lGOD").is_none());
        assert!(resolve_href(&page(), "#top").is_none());
        assert!(resolve_href(&page(), "   ").is_none());
    }

    #[test]
    fn test_wiki_page_url_encodes() {
        let url = wiki_page_url("https://onepiece.fandom.com/", "Monkey D. Luffy").unwrap();
        assert_eq!(url.as_str(), "https://onepiece.fandom.com/wiki/Monkey_D._Luffy");

        let url = wiki_page_url("https://naruto.fandom.com/fr", "Sakura Haruno").unwrap();
        assert_eq!(url.as_str(), "https://naruto.fandom.com/fr/wiki/Sakura_Haruno");

        let url = wiki_page_url("https://x.fandom.com", "Who?").unwrap();
        assert_eq!(url.path(), "/wiki/Who%3F");
    }
}
