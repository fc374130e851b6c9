//! In-memory document fixture.
//!
//! Deserializes from a JSON node tree so tests and the replay binary can load
//! document snapshots from disk. Side effects (focus/click/blur) are recorded
//! rather than performed, so callers can assert exactly which mutations a
//! handler issued.
//!
//! Node handles are assigned in document order by a pre-order walk: the root
//! is `NodeId(0)`, its first child `NodeId(1)`, and so on.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Deserialize;

use crate::dom::{Document, Query};
use crate::error::FixtureError;
use crate::types::{NodeId, Rect};

/// One node in a fixture tree, as written in fixture JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureNode {
    pub tag: String,
    #[serde(default)]
    pub attrs: HashMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub children: Vec<FixtureNode>,
}

fn default_visible() -> bool {
    true
}

impl FixtureNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: HashMap::new(),
            text: String::new(),
            rect: Rect::default(),
            visible: true,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn child(mut self, child: FixtureNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: Vec<FixtureNode>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Recorded DOM side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    Focus(NodeId),
    Click(NodeId),
    Blur(NodeId),
}

#[derive(Debug)]
struct FlatNode {
    tag: String,
    attrs: HashMap<String, String>,
    text: String,
    rect: Rect,
    visible: bool,
    parent: Option<usize>,
}

#[derive(Debug, Default)]
struct MutableState {
    focused: Option<NodeId>,
    effects: Vec<SideEffect>,
}

/// In-memory [`Document`] implementation backed by a flattened fixture tree.
#[derive(Debug)]
pub struct FixtureDocument {
    nodes: Vec<FlatNode>,
    state: Mutex<MutableState>,
}

impl FixtureDocument {
    /// Build a document from a fixture tree.
    pub fn from_root(root: FixtureNode) -> Self {
        let mut nodes = Vec::new();
        flatten(&root, None, &mut nodes);
        Self {
            nodes,
            state: Mutex::new(MutableState::default()),
        }
    }

    /// Parse a fixture tree from JSON.
    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        let root: FixtureNode = serde_json::from_str(raw)?;
        Ok(Self::from_root(root))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Side effects recorded so far, in issue order.
    pub fn effects(&self) -> Vec<SideEffect> {
        self.state.lock().effects.clone()
    }

    pub fn clear_effects(&self) {
        self.state.lock().effects.clear();
    }

    /// Set the focused node directly, for scenario setup.
    pub fn set_focused(&self, node: Option<NodeId>) {
        self.state.lock().focused = node;
    }

    fn get(&self, node: NodeId) -> Option<&FlatNode> {
        self.nodes.get(node.0 as usize)
    }

    fn descendants_text(&self, index: usize, out: &mut String) {
        out.push_str(&self.nodes[index].text);
        for (i, n) in self.nodes.iter().enumerate() {
            if n.parent == Some(index) {
                self.descendants_text(i, out);
            }
        }
    }
}

fn flatten(node: &FixtureNode, parent: Option<usize>, out: &mut Vec<FlatNode>) {
    let index = out.len();
    out.push(FlatNode {
        tag: node.tag.clone(),
        attrs: node.attrs.clone(),
        text: node.text.clone(),
        rect: node.rect,
        visible: node.visible,
        parent,
    });
    for child in &node.children {
        flatten(child, Some(index), out);
    }
}

impl Document for FixtureDocument {
    fn select(&self, query: &Query) -> Vec<NodeId> {
        let mut out = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            let id = NodeId(i as u64);
            if let Some(root) = query.within {
                if !self.contains(root, id) {
                    continue;
                }
            }
            if let Some(ref tag) = query.tag {
                if !node.tag.eq_ignore_ascii_case(tag) {
                    continue;
                }
            }
            let attrs_match = query
                .attrs
                .iter()
                .all(|(name, predicate)| predicate.matches(node.attrs.get(name).map(String::as_str)));
            if attrs_match {
                out.push(id);
            }
        }
        out
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.get(node)
            .map(|n| n.tag.to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        if self.get(node).is_some() {
            self.descendants_text(node.0 as usize, &mut out);
        }
        out
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node)?.attrs.get(name).cloned()
    }

    fn bounding_box(&self, node: NodeId) -> Rect {
        self.get(node).map(|n| n.rect).unwrap_or_default()
    }

    fn is_visible(&self, node: NodeId) -> bool {
        let mut current = match self.get(node) {
            Some(n) => n,
            None => return false,
        };
        loop {
            if !current.visible {
                return false;
            }
            match current.parent {
                Some(parent) => current = &self.nodes[parent],
                None => return true,
            }
        }
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if self.get(ancestor).is_none() {
            return false;
        }
        let mut current = node.0 as usize;
        if self.get(node).is_none() {
            return false;
        }
        loop {
            if current == ancestor.0 as usize {
                return true;
            }
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.state.lock().focused
    }

    fn focus(&self, node: NodeId) {
        let mut state = self.state.lock();
        state.focused = Some(node);
        state.effects.push(SideEffect::Focus(node));
    }

    fn click(&self, node: NodeId) {
        self.state.lock().effects.push(SideEffect::Click(node));
    }

    fn blur(&self, node: NodeId) {
        let mut state = self.state.lock();
        if state.focused == Some(node) {
            state.focused = None;
        }
        state.effects.push(SideEffect::Blur(node));
    }
}
