//! Extraction rules
//!
//! One rule per record type. Each rule takes the root of a parsed tree (plus
//! whatever context the record needs) and returns records; none of them touch
//! the network. The `parse_*` helpers parse markup and run the rule in one go,
//! keeping the parsed tree out of async code.

mod chapters;
mod manga;
mod pages;
mod search;

pub use chapters::{
    extract_chapters, parse_chapter_heading, parse_chapters, parse_release_date, ChapterHeading,
};
pub use manga::{extract_manga, extract_status, parse_manga};
pub use pages::{extract_pages, is_page_image, parse_pages};
pub use search::{extract_search_results, parse_search_results, search_term};
