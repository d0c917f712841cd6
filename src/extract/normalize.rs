//! Text cleanup for infobox values

use regex::Regex;
use std::sync::LazyLock;

/// Innermost square-bracket annotation such as `[1]` or `[citation needed]`
static ANNOTATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\[\]]*\]").expect("hardcoded regex pattern is valid"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("hardcoded regex pattern is valid"));

/// Strips bracketed annotations and collapses whitespace
///
/// Nested annotations are removed from the inside out until none remain, so
/// applying this twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use fandom_harvest::extract::strip_annotations;
///
/// assert_eq!(strip_annotations("17[1]  (Part II)[2]"), "17 (Part II)");
/// ```
pub fn strip_annotations(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let stripped = ANNOTATION_REGEX.replace_all(&current, "");
        if stripped == current {
            break;
        }
        current = stripped.into_owned();
    }

    WHITESPACE_REGEX
        .replace_all(current.trim(), " ")
        .into_owned()
}
