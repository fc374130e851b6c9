//! Messenger-shaped lookup strategies.
//!
//! Ordered by reliability: ARIA attributes first (most stable across host
//! releases), then data attributes, then bare structure. The host page ships
//! no stable per-element identifiers, so every strategy here leans on
//! semantics rather than generated class names.

use crate::dom::{AttrMatch, Document, Query};
use crate::error::StrategyError;
use crate::resolver::strategy::{QueryStrategy, Strategy, StrategySet};
use crate::types::{LogicalKey, NodeId};

/// A query whose results are filtered to nodes outside any `role="banner"`
/// region. The host keeps a hidden banner with decoy search inputs.
struct OutsideBanner {
    name: &'static str,
    query: Query,
}

impl Strategy for OutsideBanner {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, doc: &dyn Document) -> Result<Vec<NodeId>, StrategyError> {
        let banners = doc.select(&Query::new().attr("role", AttrMatch::Equals("banner".into())));
        let nodes = doc
            .select(&self.query)
            .into_iter()
            .filter(|node| !banners.iter().any(|banner| doc.contains(*banner, *node)))
            .collect();
        Ok(nodes)
    }
}

/// Locate a container via an ordered list of candidate queries, then run an
/// inner query scoped to the first container found.
struct WithinContainer {
    name: &'static str,
    containers: Vec<Query>,
    inner: Query,
}

impl Strategy for WithinContainer {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, doc: &dyn Document) -> Result<Vec<NodeId>, StrategyError> {
        for container_query in &self.containers {
            if let Some(container) = doc.select(container_query).into_iter().next() {
                let mut scoped = self.inner.clone();
                scoped.within = Some(container);
                return Ok(doc.select(&scoped));
            }
        }
        Ok(Vec::new())
    }
}

fn search_input_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        // Host-specific label, most stable currently.
        Box::new(QueryStrategy::new(
            "search_aria_exact",
            Query::new().attr(
                "aria-label",
                AttrMatch::EqualsFold("Search Messenger".into()),
            ),
        )),
        Box::new(OutsideBanner {
            name: "search_aria_contains",
            query: Query::new().attr("aria-label", AttrMatch::ContainsFold("Search".into())),
        }),
        Box::new(OutsideBanner {
            name: "search_placeholder",
            query: Query::new()
                .tag("input")
                .attr("placeholder", AttrMatch::ContainsFold("Search".into())),
        }),
        Box::new(WithinContainer {
            name: "search_role_container",
            containers: vec![Query::new().attr("role", AttrMatch::Equals("search".into()))],
            inner: Query::new().tag("input"),
        }),
        // Last resort: any visible search-like input.
        Box::new(OutsideBanner {
            name: "search_type_input",
            query: Query::new()
                .tag("input")
                .attr("type", AttrMatch::Equals("search".into())),
        }),
    ]
}

fn message_input_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(QueryStrategy::new(
            "composer_labeled_textbox",
            Query::new()
                .attr("aria-label", AttrMatch::ContainsFold("Message".into()))
                .attr("role", AttrMatch::Equals("textbox".into())),
        )),
        Box::new(QueryStrategy::new(
            "composer_editable_textbox",
            Query::new()
                .attr("role", AttrMatch::Equals("textbox".into()))
                .attr("contenteditable", AttrMatch::Equals("true".into())),
        )),
        Box::new(QueryStrategy::new(
            "composer_type_a_message",
            Query::new().attr("aria-label", AttrMatch::ContainsFold("Type a message".into())),
        )),
        // Fallbacks: contenteditable surfaces.
        Box::new(QueryStrategy::new(
            "composer_lexical_editor",
            Query::new()
                .attr("contenteditable", AttrMatch::Equals("true".into()))
                .attr("data-lexical-editor", AttrMatch::Equals("true".into())),
        )),
        Box::new(QueryStrategy::new(
            "composer_any_editable",
            Query::new().attr("contenteditable", AttrMatch::Equals("true".into())),
        )),
    ]
}

fn conversation_list_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        // Entries carry aria-current but no aria-label; the decoy sidebar
        // links are labeled.
        Box::new(QueryStrategy::new(
            "entries_current_unlabeled",
            Query::new()
                .tag("a")
                .attr("aria-current", AttrMatch::Exists)
                .attr("aria-label", AttrMatch::Absent),
        )),
        Box::new(QueryStrategy::new(
            "entries_thread_href",
            Query::new()
                .tag("a")
                .attr("href", AttrMatch::Contains("/t/".into())),
        )),
        Box::new(WithinContainer {
            name: "entries_chat_container",
            containers: vec![
                Query::new().attr("aria-label", AttrMatch::ContainsFold("Chats".into())),
                Query::new().attr("aria-label", AttrMatch::ContainsFold("Chat list".into())),
                Query::new().attr("aria-label", AttrMatch::ContainsFold("conversations".into())),
            ],
            inner: Query::new().tag("a").attr("aria-current", AttrMatch::Exists),
        }),
        Box::new(WithinContainer {
            name: "entries_role_list",
            containers: vec![Query::new().attr("role", AttrMatch::Equals("list".into()))],
            inner: Query::new().tag("a"),
        }),
    ]
}

fn active_conversation_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(QueryStrategy::new(
            "active_current_page",
            Query::new()
                .tag("a")
                .attr("aria-current", AttrMatch::Equals("page".into())),
        )),
        Box::new(QueryStrategy::new(
            "active_link_current_page",
            Query::new()
                .tag("a")
                .attr("role", AttrMatch::Equals("link".into()))
                .attr("aria-current", AttrMatch::Equals("page".into())),
        )),
    ]
}

/// The full strategy table for the messenger-shaped chat document.
pub fn messenger_set() -> StrategySet {
    let mut set = StrategySet::new();
    set.set(LogicalKey::SearchInput, search_input_strategies());
    set.set(LogicalKey::MessageInput, message_input_strategies());
    set.set(LogicalKey::ConversationList, conversation_list_strategies());
    set.set(
        LogicalKey::ActiveConversation,
        active_conversation_strategies(),
    );
    set
}
