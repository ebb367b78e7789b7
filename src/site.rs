//! Site rules for Asura Scans
//!
//! Everything that ties the adapter to one site's markup lives here: the base
//! URL, link conventions, and the pattern and vocabulary tables the extraction
//! rules are driven by.

use crate::models::Status;
use regex::Regex;
use std::sync::LazyLock;

/// Live site the adapter targets unless configured otherwise
pub const BASE_URL: &str = "https://asuracomic.net";

/// Languages the site publishes in
pub const LANGUAGES: &[&str] = &["en"];

/// Path of the search endpoint, relative to the base URL
pub const SEARCH_PATH: &str = "series";

/// Query parameter carrying the search term
pub const SEARCH_PARAM: &str = "name";

/// Search-result anchors link to series pages with a relative `series/...` href
pub const SERIES_LINK_PREFIX: &str = "series";

/// Chapter anchors carry this marker in their href
pub const CHAPTER_LINK_MARKER: &str = "/chapter/";

/// Substring of the `alt` attribute of every rendered page image
pub const PAGE_IMAGE_ALT_MARKER: &str = "chapter page";

/// Placeholder cover used when a search result has no image
pub const NO_THUMBNAIL_URL: &str = "https://placehold.co/350x500?text=No+Thumbnail";

/// Format of chapter release dates once ordinal suffixes are stripped
pub const RELEASE_DATE_FORMAT: &str = "%B %d %Y";

/// Series detail pages are titled "<name> - Asura Scans"
pub static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>.*) - Asura Scans").expect("valid title pattern"));

/// Chapter headings read "Chapter <number>[ <title>]"
pub static CHAPTER_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Chapter\s+(?P<number>\d+(?:\.\d+)?)(?P<title>.*)?$")
        .expect("valid chapter pattern")
});

/// Day numbers such as "1st" or "22nd"
pub static ORDINAL_SUFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(st|nd|rd|th)").expect("valid ordinal pattern"));

/// Words kept from a free-text search query
pub static QUERY_WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("valid query pattern"));

/// Status heading text (lower-cased) to publication status
pub const STATUS_VOCABULARY: &[(&str, Status)] = &[
    ("ongoing", Status::Ongoing),
    ("hiatus", Status::Hiatus),
    ("completed", Status::Completed),
    ("dropped", Status::Cancelled),
    ("season end", Status::Ongoing),
    ("coming soon", Status::Ongoing),
];

/// Maps the text of a status heading to a [`Status`]
///
/// Matching is case-insensitive and ignores surrounding whitespace. Anything
/// outside the vocabulary is [`Status::Unknown`].
pub fn map_status(text: &str) -> Status {
    let key = text.trim().to_lowercase();
    STATUS_VOCABULARY
        .iter()
        .find(|(label, _)| *label == key)
        .map(|(_, status)| *status)
        .unwrap_or(Status::Unknown)
}

/// Returns true if the site publishes in `language`
pub fn supports_language(language: &str) -> bool {
    LANGUAGES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(language))
}
