//! Title extraction from free-text LLM replies.
//!
//! The model is asked for a numbered list, one title per line. Parsing is two
//! rules applied in order: drop lines that are blank after trimming, then strip a
//! leading `<digits>.` (and any whitespace after the period) from each survivor.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// Parse a raw completion into an ordered list of titles.
///
/// Order is preserved exactly as returned. No sorting, deduplication or count
/// enforcement happens here.
///
/// # Example
///
/// ```
/// use headliner_core::parse_titles;
///
/// let titles = parse_titles("1. Foo\n2. Bar\n\n3.Baz");
/// assert_eq!(titles, vec!["Foo", "Bar", "Baz"]);
/// ```
pub fn parse_titles(raw: &str) -> Vec<String> {
    raw.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(strip_numbering)
        .collect()
}

/// Remove a leading `N.` marker from a single line and trim the remainder.
///
/// The marker must start the line; indented numbering is left in place.
pub fn strip_numbering(line: &str) -> String {
    LEADING_NUMBER.replace(line, "").trim().to_string()
}
