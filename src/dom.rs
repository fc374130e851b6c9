//! Document query capability consumed by the navigation core.
//!
//! The core never owns the document tree; it reads structure and issues
//! focus/click/blur against nodes identified by opaque handles. Any
//! implementation of [`Document`] — a live tree binding in the host shell, a
//! virtual DOM, or the in-memory [`fixture::FixtureDocument`] — satisfies the
//! resolver, validator, and navigation contracts unchanged.

pub mod fixture;

use crate::types::{NodeId, Rect};

/// Attribute predicate for structured queries.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrMatch {
    /// Attribute present, any value.
    Exists,
    /// Attribute absent.
    Absent,
    /// Exact value, case-sensitive.
    Equals(String),
    /// Exact value, ASCII case-insensitive.
    EqualsFold(String),
    /// Value contains the substring, case-sensitive.
    Contains(String),
    /// Value contains the substring, ASCII case-insensitive.
    ContainsFold(String),
}

impl AttrMatch {
    /// Apply the predicate to an attribute value (`None` = attribute absent).
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            AttrMatch::Exists => value.is_some(),
            AttrMatch::Absent => value.is_none(),
            AttrMatch::Equals(expected) => value == Some(expected.as_str()),
            AttrMatch::EqualsFold(expected) => {
                value.map_or(false, |v| v.eq_ignore_ascii_case(expected))
            }
            AttrMatch::Contains(needle) => value.map_or(false, |v| v.contains(needle.as_str())),
            AttrMatch::ContainsFold(needle) => value.map_or(false, |v| {
                v.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
            }),
        }
    }
}

/// Structured query over the document tree.
///
/// The equivalent of an attribute selector like
/// `a[aria-current]:not([aria-label])`: an optional tag filter plus attribute
/// predicates, optionally scoped to a subtree root. Matching nodes are always
/// returned in document order.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub tag: Option<String>,
    pub attrs: Vec<(String, AttrMatch)>,
    pub within: Option<NodeId>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn attr(mut self, name: &str, predicate: AttrMatch) -> Self {
        self.attrs.push((name.to_string(), predicate));
        self
    }

    pub fn within(mut self, root: NodeId) -> Self {
        self.within = Some(root);
        self
    }
}

/// Live, mutable tree of nodes the core navigates but does not own.
///
/// Reads must reflect the current document state on every call; the tree
/// mutates asynchronously relative to shortcut timing. The three side-effect
/// methods are the only mutations the core ever performs.
pub trait Document {
    /// All nodes matching `query`, in document order.
    fn select(&self, query: &Query) -> Vec<NodeId>;

    /// Tag name of a node (lowercase by convention).
    fn tag_name(&self, node: NodeId) -> String;

    /// Rendered text content of a node and its descendants.
    fn text_content(&self, node: NodeId) -> String;

    /// One attribute value, if present.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Bounding box in device-independent units.
    fn bounding_box(&self, node: NodeId) -> Rect;

    /// Whether the node participates in layout: rendered, not detached or
    /// hidden, with a layout ancestor chain up to the document root.
    fn is_visible(&self, node: NodeId) -> bool;

    /// Whether `ancestor` contains `node`. A node contains itself.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Currently focused node, if any.
    fn focused(&self) -> Option<NodeId>;

    /// Move focus to the node.
    fn focus(&self, node: NodeId);

    /// Activate the node.
    fn click(&self, node: NodeId);

    /// Remove focus from the node if it is focused.
    fn blur(&self, node: NodeId);
}
