use crate::dom::{find_all, follow_path, Document, Step, TreeNode};
use crate::models::SearchResultRecord;
use crate::site::{NO_THUMBNAIL_URL, QUERY_WORD_PATTERN, SERIES_LINK_PREFIX};

/// Where the display name sits inside a result anchor
const NAME_PATH: &[Step] = &[
    Step::child("div"),
    Step::child("div"),
    Step::nth("div", 2),
    Step::nth("span", 1),
];

/// Normalizes a free-text query into the term the site searches for
///
/// Only runs of ASCII letters survive; they are joined with single spaces and
/// lower-cased.
///
/// ```
/// use asura_adapter::extract::search_term;
///
/// assert_eq!(search_term("One-Piece 2024!"), "one piece");
/// ```
pub fn search_term(query: &str) -> String {
    QUERY_WORD_PATTERN
        .find_iter(query)
        .map(|word| word.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Extracts search results from a results page
///
/// Anchors without a name node are skipped rather than emitted half-filled.
pub fn extract_search_results<N: TreeNode>(root: N, base_url: &str) -> Vec<SearchResultRecord> {
    let anchors = find_all(root, |node| {
        node.is("a")
            && node
                .attribute("href")
                .is_some_and(|href| href.starts_with(SERIES_LINK_PREFIX))
    });

    anchors
        .into_iter()
        .filter_map(|anchor| search_result(anchor, base_url))
        .collect()
}

/// Parses a results page and extracts its search results
pub fn parse_search_results(markup: &str, base_url: &str) -> Vec<SearchResultRecord> {
    let document = Document::parse(markup);
    extract_search_results(document.root(), base_url)
}

fn search_result<N: TreeNode>(anchor: N, base_url: &str) -> Option<SearchResultRecord> {
    let href = anchor.attribute("href")?;

    let Some(name_node) = follow_path(anchor, NAME_PATH).into_iter().next() else {
        tracing::debug!(href, "Skipping search result without a name");
        return None;
    };

    let cover = anchor
        .descendant_elements()
        .into_iter()
        .find(|node| node.is("img"))
        .and_then(|img| img.attribute("src").filter(|src| !src.is_empty()).map(str::to_string))
        .unwrap_or_else(|| NO_THUMBNAIL_URL.to_string());

    Some(SearchResultRecord {
        url: format!("{}/{}", base_url, href),
        cover,
        name: name_node.own_text(),
    })
}
