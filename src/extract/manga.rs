use crate::dom::{ancestor, find_all, find_first, follow_path, Document, Step, TreeNode};
use crate::models::{MangaRecord, Status};
use crate::site::{map_status, TITLE_PATTERN};
use crate::{ExtractError, ExtractResult};

/// From the "Genres" heading to the tag buttons
const TAG_PATH: &[Step] = &[Step::Parent, Step::child("div"), Step::child("button")];

/// From the "Status" heading to the heading holding the value
const STATUS_PATH: &[Step] = &[Step::Parent, Step::nth("h3", 2)];

/// Poster images are at least this large; smaller "poster" images are thumbnails
const MIN_POSTER_WIDTH: f64 = 200.0;
const MIN_POSTER_HEIGHT: f64 = 350.0;

/// Extracts the details of one series
///
/// The status heading, page title, poster image and synopsis paragraph are all
/// required; a page missing any of them yields an error instead of a partial
/// record. Tags and the series name are optional.
pub fn extract_manga<N: TreeNode>(root: N, url: &str) -> ExtractResult<MangaRecord> {
    let tags = extract_tags(root);
    let complete = extract_status(root)?.is_complete();
    let name = extract_name(root)?;
    let description = extract_description(root)?;

    Ok(MangaRecord {
        name,
        description,
        tags,
        complete,
        url: url.to_string(),
    })
}

/// Parses a series page and extracts its details
pub fn parse_manga(markup: &str, url: &str) -> ExtractResult<MangaRecord> {
    let document = Document::parse(markup);
    extract_manga(document.root(), url)
}

fn extract_tags<N: TreeNode>(root: N) -> Vec<String> {
    find_all(root, |node| node.is("h3") && node.has_own_text("Genres"))
        .into_iter()
        .flat_map(|heading| follow_path(heading, TAG_PATH))
        .map(|button| button.own_text())
        .collect()
}

/// Reads the publication status from the "Status" heading pair
pub fn extract_status<N: TreeNode>(root: N) -> ExtractResult<Status> {
    let value = find_all(root, |node| node.is("h3") && node.has_own_text("Status"))
        .into_iter()
        .flat_map(|heading| follow_path(heading, STATUS_PATH))
        .next()
        .ok_or(ExtractError::MissingElement("status heading"))?;

    Ok(map_status(&value.own_text()))
}

fn extract_name<N: TreeNode>(root: N) -> ExtractResult<Option<String>> {
    let title = find_first(root, |node| node.is("title"))
        .ok_or(ExtractError::MissingElement("title"))?
        .own_text();

    Ok(TITLE_PATTERN
        .captures(&title)
        .map(|caps| caps["name"].to_string()))
}

fn extract_description<N: TreeNode>(root: N) -> ExtractResult<String> {
    let poster = find_first(root, is_poster).ok_or(ExtractError::MissingElement("poster image"))?;
    let container = ancestor(poster, 2).ok_or(ExtractError::MissingElement("poster container"))?;

    let paragraph = container
        .descendant_elements()
        .into_iter()
        .filter(|node| node.is("span"))
        .flat_map(|span| follow_path(span, &[Step::child("p")]))
        .next()
        .ok_or(ExtractError::MissingElement("description paragraph"))?;

    Ok(paragraph.text_content())
}

fn is_poster<N: TreeNode>(node: &N) -> bool {
    node.is("img")
        && node.attribute("alt") == Some("poster")
        && node
            .numeric_attribute("width")
            .is_some_and(|width| width >= MIN_POSTER_WIDTH)
        && node
            .numeric_attribute("height")
            .is_some_and(|height| height >= MIN_POSTER_HEIGHT)
}
