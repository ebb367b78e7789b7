//! HTML tree queries
//!
//! The extraction rules only ever talk to [`TreeNode`], so they are written
//! against "an element in a tree" rather than against a particular parser.
//! [`Document`] parses markup with `scraper` and hands out its root element.
//!
//! Queries come in two flavors:
//! - predicate search over all descendants ([`find_all`]), the equivalent of
//!   `//tag[predicate]`
//! - relative paths built from [`Step`]s ([`follow_path`]), the equivalent of
//!   `./div/div[2]/span[1]` or `../h3[2]`

use scraper::{ElementRef, Html};

/// An element in a parsed HTML tree
pub trait TreeNode: Copy {
    /// Local tag name, lower-case
    fn tag(&self) -> &str;

    /// Value of an attribute, if present
    fn attribute(&self, name: &str) -> Option<&str>;

    /// The parent element, `None` at the root
    fn parent_element(&self) -> Option<Self>;

    /// Element children in document order
    fn child_elements(&self) -> Vec<Self>;

    /// All element descendants in document order, excluding `self`
    fn descendant_elements(&self) -> Vec<Self>;

    /// The text nodes that are direct children of this element
    fn own_texts(&self) -> Vec<&str>;

    /// All descendant text concatenated, markup stripped
    fn text_content(&self) -> String;

    /// Direct text of this element, ignoring text inside child elements
    fn own_text(&self) -> String {
        self.own_texts().concat()
    }

    /// True if one of the direct text nodes reads `text`
    fn has_own_text(&self, text: &str) -> bool {
        self.own_texts().iter().any(|t| t.trim() == text)
    }

    /// Attribute parsed as a number, `None` when absent or not numeric
    fn numeric_attribute(&self, name: &str) -> Option<f64> {
        self.attribute(name)?
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| !n.is_nan())
    }

    fn is(&self, tag: &str) -> bool {
        self.tag().eq_ignore_ascii_case(tag)
    }
}

impl<'a> TreeNode for ElementRef<'a> {
    fn tag(&self) -> &str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent().and_then(ElementRef::wrap)
    }

    fn child_elements(&self) -> Vec<Self> {
        self.children().filter_map(ElementRef::wrap).collect()
    }

    fn descendant_elements(&self) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn own_texts(&self) -> Vec<&str> {
        self.children()
            .filter_map(|child| child.value().as_text())
            .map(|text| &**text)
            .collect()
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }
}

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document; malformed markup is repaired, never rejected
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// The `<html>` element
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

/// One step of a relative path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `..`
    Parent,
    /// `tag` or `tag[position]`; positions are 1-based and counted among
    /// same-tag siblings
    Child {
        tag: &'static str,
        position: Option<usize>,
    },
}

impl Step {
    pub const fn child(tag: &'static str) -> Self {
        Step::Child {
            tag,
            position: None,
        }
    }

    pub const fn nth(tag: &'static str, position: usize) -> Self {
        Step::Child {
            tag,
            position: Some(position),
        }
    }
}

/// Every element at or below `root` that satisfies `predicate`, in document order
pub fn find_all<N, P>(root: N, predicate: P) -> Vec<N>
where
    N: TreeNode,
    P: Fn(&N) -> bool,
{
    std::iter::once(root)
        .chain(root.descendant_elements())
        .filter(|node| predicate(node))
        .collect()
}

/// First element at or below `root` that satisfies `predicate`
pub fn find_first<N, P>(root: N, predicate: P) -> Option<N>
where
    N: TreeNode,
    P: Fn(&N) -> bool,
{
    std::iter::once(root)
        .chain(root.descendant_elements())
        .find(|node| predicate(node))
}

/// Evaluates a relative path from `start`
///
/// Each step is applied to every node reached by the previous one, so a step
/// without a position fans out to all matching children.
pub fn follow_path<N: TreeNode>(start: N, steps: &[Step]) -> Vec<N> {
    let mut current = vec![start];

    for step in steps {
        let mut next = Vec::new();
        for node in &current {
            match *step {
                Step::Parent => next.extend(node.parent_element()),
                Step::Child { tag, position } => {
                    let mut matching = node
                        .child_elements()
                        .into_iter()
                        .filter(|child| child.is(tag));
                    match position {
                        Some(position) => {
                            next.extend(position.checked_sub(1).and_then(|i| matching.nth(i)))
                        }
                        None => next.extend(matching),
                    }
                }
            }
        }
        current = next;
    }

    current
}

/// Walks `levels` parents up from `node`
pub fn ancestor<N: TreeNode>(node: N, levels: usize) -> Option<N> {
    let mut current = node;
    for _ in 0..levels {
        current = current.parent_element()?;
    }
    Some(current)
}
