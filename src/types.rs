//! Core identifier and geometry types shared across the crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a node in the host document.
///
/// Handles are minted by the [`Document`](crate::dom::Document)
/// implementation and are only meaningful against the document that issued
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounding box of a node in device-independent units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A box with only a size, for fixtures where position is irrelevant.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Logical UI target, independent of how it is located in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    /// The conversation search box.
    SearchInput,
    /// The message composer of the open conversation.
    MessageInput,
    /// The list of conversation entries (list-valued key).
    ConversationList,
    /// The entry marked as currently selected.
    ActiveConversation,
}

impl LogicalKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalKey::SearchInput => "search_input",
            LogicalKey::MessageInput => "message_input",
            LogicalKey::ConversationList => "conversation_list",
            LogicalKey::ActiveConversation => "active_conversation",
        }
    }
}

impl fmt::Display for LogicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_sized_has_origin_zero() {
        let rect = Rect::sized(120.0, 48.0);
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
        assert_eq!(rect.width, 120.0);
        assert_eq!(rect.height, 48.0);
    }

    #[test]
    fn logical_key_names_are_distinct() {
        let keys = [
            LogicalKey::SearchInput,
            LogicalKey::MessageInput,
            LogicalKey::ConversationList,
            LogicalKey::ActiveConversation,
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}
