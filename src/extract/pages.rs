use crate::dom::{find_all, Document, TreeNode};
use crate::models::PageRecord;
use crate::site::PAGE_IMAGE_ALT_MARKER;

/// True for the `<img>` elements that hold the pages of a chapter
pub fn is_page_image<N: TreeNode>(node: &N) -> bool {
    node.is("img")
        && node
            .attribute("alt")
            .is_some_and(|alt| alt.contains(PAGE_IMAGE_ALT_MARKER))
}

/// Extracts page images in reading (document) order
pub fn extract_pages<N: TreeNode>(root: N) -> Vec<PageRecord> {
    find_all(root, is_page_image)
        .into_iter()
        .filter_map(|img| {
            img.attribute("src").map(|src| PageRecord {
                url: src.to_string(),
            })
        })
        .collect()
}

/// Parses a rendered chapter page and extracts its page images
pub fn parse_pages(markup: &str) -> Vec<PageRecord> {
    let document = Document::parse(markup);
    extract_pages(document.root())
}
