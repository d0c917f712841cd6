//! Embedded page metadata
//!
//! Wiki pages carry a script payload with the article's numeric id. This is
//! the only place that knows how that payload looks.

use crate::crawler::Document;
use regex::Regex;
use std::sync::LazyLock;

static PAGE_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""pageId"\s*:\s*(\d+)"#).expect("hardcoded regex pattern is valid"));

/// Returns the first `"pageId":<digits>` found in the page's scripts, or 0
pub fn extract_page_id(document: &Document) -> u64 {
    document
        .script_texts()
        .iter()
        .find_map(|script| page_id_in(script))
        .unwrap_or(0)
}

/// Searches one script body for the page id
pub fn page_id_in(script: &str) -> Option<u64> {
    PAGE_ID_REGEX
        .captures(script)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn document(body: &str) -> Document {
        Document::parse(body, Url::parse("https://naruto.fandom.com/wiki/A").unwrap())
    }

    #[test]
    fn test_page_id_found() {
        let doc = document(
            r#"<html><head><script>var cfg = {"wgArticleId":1,"pageId":4242,"x":2};</script></head></html>"#,
        );
        assert_eq!(extract_page_id(&doc), 4242);
    }

    #[test]
    fn test_first_match_wins() {
        let doc = document(
            r#"<html><head>
            <script>var a = {"pageId":7};</script>
            <script>var b = {"pageId":8};</script>
            </head></html>"#,
        );
        assert_eq!(extract_page_id(&doc), 7);
    }

    #[test]
    fn test_missing_defaults_to_zero() {
        let doc = document("<html><head><script>var a = 1;</script></head></html>");
        assert_eq!(extract_page_id(&doc), 0);
    }

    #[test]
    fn test_pattern_outside_scripts_ignored() {
        let doc = document(r#"<html><body><p>"pageId":99</p></body></html>"#);
        assert_eq!(extract_page_id(&doc), 0);
    }

    #[test]
    fn test_page_id_in() {
        assert_eq!(page_id_in(r#"{"pageId": 12}"#), Some(12));
        assert_eq!(page_id_in(r#"{"pageId":"12"}"#), None);
        assert_eq!(page_id_in("nothing"), None);
    }
}
