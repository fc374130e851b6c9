//! Action dispatch: wire messages to shortcut handlers.
//!
//! Messages arrive one at a time from the control channel and are handled
//! strictly in arrival order; handler bodies are synchronous. No error
//! crosses the action boundary — a malformed message or a mid-mutation
//! document state degrades to a logged no-op, never a panic, because the
//! document mutates asynchronously relative to shortcut timing.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ValidatorConfig;
use crate::dom::Document;
use crate::nav;
use crate::resolver::{strategies, Resolver};
use crate::types::{LogicalKey, NodeId};

/// Inbound control-channel message: an action name plus optional arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortcutMessage {
    pub action: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl ShortcutMessage {
    pub fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, arg: Value) -> Self {
        self.args.push(arg);
        self
    }
}

/// Parsed shortcut action. `SwitchConversation` carries a 0-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FocusSearch,
    FocusMessageInput,
    SwitchConversation(usize),
    PreviousConversation,
    NextConversation,
    Escape,
}

impl Action {
    /// Parse a wire message.
    ///
    /// `switch-conversation` takes `args[0]` as a 1-based ordinal (a JSON
    /// number or a numeric string, since the channel does not guarantee a
    /// type) and converts it to a 0-based index. Unknown names and malformed
    /// arguments parse to `None`.
    pub fn parse(msg: &ShortcutMessage) -> Option<Action> {
        match msg.action.as_str() {
            "focus-search" => Some(Action::FocusSearch),
            "focus-message-input" => Some(Action::FocusMessageInput),
            "switch-conversation" => {
                let index = msg.args.first().and_then(ordinal_to_index)?;
                Some(Action::SwitchConversation(index))
            }
            "previous-conversation" => Some(Action::PreviousConversation),
            "next-conversation" => Some(Action::NextConversation),
            "escape" => Some(Action::Escape),
            _ => None,
        }
    }
}

/// 1-based ordinal argument to 0-based index.
fn ordinal_to_index(value: &Value) -> Option<usize> {
    let ordinal = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    if ordinal < 1 {
        return None;
    }
    Some(ordinal as usize - 1)
}

/// Shortcut engine: composes the resolver, validator, and navigation tracker
/// behind the six named actions.
///
/// One instance per active document session. Each handler performs at most
/// one DOM mutation and reports a boolean outcome; outcomes are logged and
/// never surfaced back over the channel.
pub struct Engine {
    resolver: Resolver,
    validator: ValidatorConfig,
}

impl Engine {
    pub fn new(resolver: Resolver, validator: ValidatorConfig) -> Self {
        Self {
            resolver,
            validator,
        }
    }

    /// Engine with the messenger strategy table and default thresholds.
    pub fn with_defaults() -> Self {
        Self::new(Resolver::new(strategies::messenger_set()), ValidatorConfig::default())
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Entry point for the control channel.
    pub fn dispatch(&self, doc: &dyn Document, msg: &ShortcutMessage) -> bool {
        debug!(action = %msg.action, args = ?msg.args, "received");
        match Action::parse(msg) {
            Some(action) => self.run(doc, action),
            None => {
                warn!(action = %msg.action, "unknown or malformed action");
                false
            }
        }
    }

    /// Run a parsed action.
    pub fn run(&self, doc: &dyn Document, action: Action) -> bool {
        let ok = match action {
            Action::FocusSearch => self.focus_search(doc),
            Action::FocusMessageInput => self.focus_message_input(doc),
            Action::SwitchConversation(index) => self.switch_to_conversation(doc, index),
            Action::PreviousConversation => self.previous_conversation(doc),
            Action::NextConversation => self.next_conversation(doc),
            Action::Escape => self.escape(doc),
        };
        if !ok {
            info!(?action, "action was a no-op");
        }
        ok
    }

    /// Focus and activate the search input.
    pub fn focus_search(&self, doc: &dyn Document) -> bool {
        match self.resolver.resolve_one(doc, LogicalKey::SearchInput) {
            Some(node) => {
                doc.focus(node);
                doc.click(node);
                info!("focused search input");
                true
            }
            None => false,
        }
    }

    /// Focus and activate the message composer.
    pub fn focus_message_input(&self, doc: &dyn Document) -> bool {
        match self.resolver.resolve_one(doc, LogicalKey::MessageInput) {
            Some(node) => {
                doc.focus(node);
                doc.click(node);
                info!("focused message input");
                true
            }
            None => false,
        }
    }

    /// Activate the conversation at `index` (0-based among validated entries).
    pub fn switch_to_conversation(&self, doc: &dyn Document, index: usize) -> bool {
        let raw = self.resolver.resolve_many(doc, LogicalKey::ConversationList);
        let entries = nav::validate_entries(doc, &raw, &self.validator);
        info!(raw = raw.len(), valid = entries.len(), "conversation candidates");

        if entries.is_empty() {
            warn!("no valid conversations found");
            for (i, &node) in raw.iter().take(3).enumerate() {
                let label = doc
                    .attribute(node, "aria-label")
                    .unwrap_or_else(|| "no label".to_string());
                warn!(index = i, tag = %doc.tag_name(node), %label, "raw candidate");
            }
            return false;
        }

        if index >= entries.len() {
            warn!(index, available = entries.len(), "conversation index out of range");
            return false;
        }

        doc.click(entries[index]);
        info!(conversation = index + 1, "switched conversation");
        true
    }

    /// Navigate to the previous conversation, wrapping to the last.
    pub fn previous_conversation(&self, doc: &dyn Document) -> bool {
        let entries = self.validated_entries(doc);
        let current = self.active_entry_index(doc, &entries);
        match nav::previous_index(entries.len(), current) {
            Some(target) => self.switch_to_conversation(doc, target),
            None => false,
        }
    }

    /// Navigate to the next conversation, wrapping to the first.
    pub fn next_conversation(&self, doc: &dyn Document) -> bool {
        let entries = self.validated_entries(doc);
        let current = self.active_entry_index(doc, &entries);
        match nav::next_index(entries.len(), current) {
            Some(target) => self.switch_to_conversation(doc, target),
            None => false,
        }
    }

    /// Leave the search box: if it holds focus, blur it, then land on the
    /// message composer either way.
    pub fn escape(&self, doc: &dyn Document) -> bool {
        if let Some(search) = self.resolver.resolve_one(doc, LogicalKey::SearchInput) {
            if doc.focused() == Some(search) {
                doc.blur(search);
                info!("escaped from search");
                self.focus_message_input(doc);
                return true;
            }
        }
        self.focus_message_input(doc)
    }

    fn validated_entries(&self, doc: &dyn Document) -> Vec<NodeId> {
        let raw = self.resolver.resolve_many(doc, LogicalKey::ConversationList);
        nav::validate_entries(doc, &raw, &self.validator)
    }

    fn active_entry_index(&self, doc: &dyn Document, entries: &[NodeId]) -> Option<usize> {
        let active = self.resolver.resolve_one(doc, LogicalKey::ActiveConversation);
        nav::active_index(doc, entries, active)
    }
}
