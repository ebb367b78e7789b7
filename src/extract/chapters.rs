use crate::dom::{find_all, Document, TreeNode};
use crate::models::{ChapterRecord, RequestContext};
use crate::site::{
    CHAPTER_LINK_MARKER, CHAPTER_NAME_PATTERN, ORDINAL_SUFFIX_PATTERN, RELEASE_DATE_FORMAT,
};
use crate::{ExtractError, ExtractResult};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::HashSet;

/// Number and display name parsed from a chapter heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterHeading {
    pub number: String,
    pub name: String,
}

/// Extracts the chapter list of a series page
///
/// The site lists chapters newest first; records come back oldest first.
/// Anchors that do not carry both a name and a date heading are skipped, and
/// a chapter whose composed URL was already emitted is dropped. A name
/// heading that is not of the form "Chapter <number>..." fails the whole list.
pub fn extract_chapters<N: TreeNode>(
    root: N,
    manga_url: &str,
    context: &RequestContext,
) -> ExtractResult<Vec<ChapterRecord>> {
    let manga_url = manga_url.trim_end_matches('/');
    let anchors = find_all(root, |node| {
        node.is("a")
            && node
                .attribute("href")
                .is_some_and(|href| href.contains(CHAPTER_LINK_MARKER))
    });

    let mut added_urls = HashSet::new();
    let mut chapters = Vec::new();
    let mut last_release_date = None;

    for anchor in anchors.into_iter().rev() {
        let headings: Vec<N> = anchor
            .child_elements()
            .into_iter()
            .filter(|node| node.is("h3"))
            .collect();
        if headings.len() < 2 {
            continue;
        }

        let source_url = anchor.attribute("href").unwrap_or_default().to_string();
        let heading = parse_chapter_heading(&headings[0].text_content())?;

        let url = format!("{}/chapter/{}", manga_url, heading.number);
        if !added_urls.insert(url.clone()) {
            tracing::debug!(url = %url, "Skipping duplicate chapter");
            continue;
        }

        // An unparsable date keeps the value of the last chapter that had one.
        let date_text = headings[1].text_content();
        let release_date = if date_text.is_empty() {
            None
        } else {
            match parse_release_date(&date_text) {
                Some(date) => {
                    last_release_date = Some(date);
                    Some(date)
                }
                None => {
                    tracing::debug!(date = %date_text, url = %url, "Unparsable release date");
                    last_release_date
                }
            }
        };

        chapters.push(ChapterRecord {
            url,
            source_url,
            chapter_number: heading.number,
            name: heading.name,
            release_date,
            arguments: context.clone(),
            page_count: 0,
        });
    }

    Ok(chapters)
}

/// Parses a series page and extracts its chapter list
pub fn parse_chapters(
    markup: &str,
    manga_url: &str,
    context: &RequestContext,
) -> ExtractResult<Vec<ChapterRecord>> {
    let document = Document::parse(markup);
    extract_chapters(document.root(), manga_url, context)
}

/// Parses a heading such as "Chapter 12 The Return"
///
/// The number is kept as written so "10.5" survives unchanged. The trailing
/// text becomes the name when it is longer than one character once trimmed;
/// otherwise the number doubles as the name.
pub fn parse_chapter_heading(text: &str) -> ExtractResult<ChapterHeading> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let caps = CHAPTER_NAME_PATTERN
        .captures(&text)
        .ok_or_else(|| ExtractError::PatternMismatch {
            field: "chapter name",
            text: text.clone(),
        })?;

    let number = caps["number"].to_string();
    let name = caps
        .name("title")
        .map(|title| title.as_str().trim())
        .filter(|title| title.chars().count() > 1)
        .map(str::to_string)
        .unwrap_or_else(|| number.clone());

    Ok(ChapterHeading { number, name })
}

/// Parses a release date such as "January 1st 2024" as UTC midnight
pub fn parse_release_date(text: &str) -> Option<DateTime<Utc>> {
    let cleaned = ORDINAL_SUFFIX_PATTERN.replace_all(text, "${1}");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    let date = NaiveDate::parse_from_str(&cleaned, RELEASE_DATE_FORMAT).ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
