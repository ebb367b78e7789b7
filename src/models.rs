//! Record types produced by the adapter
//!
//! Every record is a flat struct that serializes to a flat JSON object. Records
//! are built fresh for each call and never outlive the list they are returned in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultRecord {
    /// Absolute series page URL
    pub url: String,

    /// Cover image URL, or the site's no-thumbnail placeholder
    pub cover: String,

    /// Display name (may be empty)
    pub name: String,
}

/// Details of one series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MangaRecord {
    /// Series name, unset when the page title is not in the expected shape
    pub name: Option<String>,

    /// Plain-text synopsis
    pub description: String,

    /// Genre tags in document order
    pub tags: Vec<String>,

    /// True only when the site reports the series as completed
    pub complete: bool,

    /// The URL the record was extracted from
    pub url: String,
}

/// One chapter of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Composed chapter URL, `{manga_url}/chapter/{chapter_number}`
    pub url: String,

    /// The chapter anchor's own href
    pub source_url: String,

    /// Chapter number as written on the site ("12", "10.5")
    pub chapter_number: String,

    /// Chapter title, or the chapter number when the heading has none
    pub name: String,

    /// Release date at UTC midnight
    pub release_date: Option<DateTime<Utc>>,

    /// The context the chapter list was requested with
    pub arguments: RequestContext,

    /// Always 0: pages are only counted when requested per chapter
    pub page_count: u32,
}

/// One page image of a chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Image source URL
    pub url: String,
}

/// Context supplied by the caller for detail, chapter and page requests
///
/// Only `url` is interpreted. Any other keys are carried along untouched and
/// echoed back on each [`ChapterRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RequestContext {
    /// Creates a context holding only a URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            extra: Map::new(),
        }
    }

    /// Adds an opaque key that is echoed back with every chapter
    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Publication status of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ongoing,
    Hiatus,
    Completed,
    Cancelled,
    Unknown,
}

impl Status {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
