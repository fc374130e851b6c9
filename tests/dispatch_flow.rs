//! End-to-end dispatch scenarios against a messenger-shaped fixture.
//!
//! These tests drive the public control-channel surface: a wire message goes
//! in, at most one DOM mutation comes out, and every failure is a clean
//! no-op.

use chatnav::dispatch::{Action, Engine, ShortcutMessage};
use chatnav::dom::fixture::{FixtureDocument, FixtureNode, SideEffect};
use chatnav::dom::Document;
use chatnav::error::StrategyError;
use chatnav::resolver::strategy::{Strategy, StrategySet};
use chatnav::resolver::{strategies, Resolver};
use chatnav::types::{LogicalKey, NodeId, Rect};
use serde_json::json;

/// A chat document in the expected semantic shape.
///
/// Node handles (pre-order):
///   0 body
///   1 hidden banner, 2 decoy search input
///   3 search input
///   4 sidebar nav, 5 labeled decoy link
///   6 conversation list, 7 Alice, 8 Bob (active), 9 Carol
///   10 message composer
fn chat_document() -> FixtureDocument {
    FixtureDocument::from_root(
        FixtureNode::new("body")
            .child(
                FixtureNode::new("div")
                    .attr("role", "banner")
                    .hidden()
                    .child(FixtureNode::new("input").attr("aria-label", "Search decoy")),
            )
            .child(
                FixtureNode::new("input")
                    .attr("aria-label", "Search Messenger")
                    .rect(Rect::sized(240.0, 36.0)),
            )
            .child(
                FixtureNode::new("nav").child(
                    FixtureNode::new("a")
                        .attr("aria-label", "Chats")
                        .attr("href", "/t/nav")
                        .text("Chats")
                        .rect(Rect::sized(60.0, 60.0)),
                ),
            )
            .child(
                FixtureNode::new("div").attr("role", "list").children(vec![
                    FixtureNode::new("a")
                        .attr("href", "/t/1")
                        .attr("aria-current", "false")
                        .text("Alice")
                        .rect(Rect::sized(320.0, 64.0)),
                    FixtureNode::new("a")
                        .attr("href", "/t/2")
                        .attr("aria-current", "page")
                        .text("Bob")
                        .rect(Rect::sized(320.0, 64.0)),
                    FixtureNode::new("a")
                        .attr("href", "/t/3")
                        .attr("aria-current", "false")
                        .text("Carol")
                        .rect(Rect::sized(320.0, 64.0)),
                ]),
            )
            .child(
                FixtureNode::new("div")
                    .attr("role", "textbox")
                    .attr("contenteditable", "true")
                    .attr("aria-label", "Message Bob")
                    .rect(Rect::sized(480.0, 40.0)),
            ),
    )
}

const SEARCH: NodeId = NodeId(3);
const ALICE: NodeId = NodeId(7);
const BOB: NodeId = NodeId(8);
const CAROL: NodeId = NodeId(9);
const COMPOSER: NodeId = NodeId(10);

#[test]
fn focus_search_focuses_and_activates() {
    let doc = chat_document();
    let engine = Engine::with_defaults();

    assert!(engine.dispatch(&doc, &ShortcutMessage::new("focus-search")));
    assert_eq!(
        doc.effects(),
        vec![SideEffect::Focus(SEARCH), SideEffect::Click(SEARCH)]
    );
    assert_eq!(doc.focused(), Some(SEARCH));
}

#[test]
fn focus_message_input_lands_on_composer() {
    let doc = chat_document();
    let engine = Engine::with_defaults();

    assert!(engine.dispatch(&doc, &ShortcutMessage::new("focus-message-input")));
    assert_eq!(
        doc.effects(),
        vec![SideEffect::Focus(COMPOSER), SideEffect::Click(COMPOSER)]
    );
}

#[test]
fn switch_conversation_clicks_the_requested_entry() {
    let doc = chat_document();
    let engine = Engine::with_defaults();

    // 1-based over the wire; sidebar decoy does not count.
    let msg = ShortcutMessage::new("switch-conversation").with_arg(json!(1));
    assert!(engine.dispatch(&doc, &msg));
    assert_eq!(doc.effects(), vec![SideEffect::Click(ALICE)]);
}

#[test]
fn switch_conversation_out_of_range_mutates_nothing() {
    let doc = chat_document();
    let engine = Engine::with_defaults();

    let msg = ShortcutMessage::new("switch-conversation").with_arg(json!(5));
    assert!(!engine.dispatch(&doc, &msg));
    assert!(doc.effects().is_empty());
}

#[test]
fn next_then_previous_walks_around_the_active_entry() {
    let doc = chat_document();
    let engine = Engine::with_defaults();

    // Bob (index 1) is active; next lands on Carol.
    assert!(engine.dispatch(&doc, &ShortcutMessage::new("next-conversation")));
    assert_eq!(doc.effects(), vec![SideEffect::Click(CAROL)]);

    // The fixture tree does not move its marker, so Bob is still active;
    // previous lands on Alice.
    doc.clear_effects();
    assert!(engine.dispatch(&doc, &ShortcutMessage::new("previous-conversation")));
    assert_eq!(doc.effects(), vec![SideEffect::Click(ALICE)]);
}

#[test]
fn next_wraps_from_the_last_entry() {
    // The last entry is marked active here.
    let doc = FixtureDocument::from_root(
        FixtureNode::new("body").child(FixtureNode::new("div").attr("role", "list").children(
            vec![
                FixtureNode::new("a")
                    .attr("href", "/t/1")
                    .attr("aria-current", "false")
                    .text("Alice")
                    .rect(Rect::sized(320.0, 64.0)),
                FixtureNode::new("a")
                    .attr("href", "/t/2")
                    .attr("aria-current", "page")
                    .text("Bob")
                    .rect(Rect::sized(320.0, 64.0)),
            ],
        )),
    );
    let engine = Engine::with_defaults();

    assert!(engine.run(&doc, Action::NextConversation));
    assert_eq!(doc.effects(), vec![SideEffect::Click(NodeId(2))]);
}

#[test]
fn navigation_with_no_active_entry_starts_at_the_edges() {
    // No aria-current="page" anywhere.
    let doc = FixtureDocument::from_root(
        FixtureNode::new("body").child(FixtureNode::new("div").attr("role", "list").children(
            vec![
                FixtureNode::new("a")
                    .attr("href", "/t/1")
                    .text("Alice")
                    .rect(Rect::sized(320.0, 64.0)),
                FixtureNode::new("a")
                    .attr("href", "/t/2")
                    .text("Bob")
                    .rect(Rect::sized(320.0, 64.0)),
            ],
        )),
    );
    let engine = Engine::with_defaults();

    assert!(engine.run(&doc, Action::NextConversation));
    assert_eq!(doc.effects(), vec![SideEffect::Click(NodeId(2))]);

    doc.clear_effects();
    assert!(engine.run(&doc, Action::PreviousConversation));
    assert_eq!(doc.effects(), vec![SideEffect::Click(NodeId(3))]);
}

#[test]
fn navigation_on_empty_document_fails_cleanly() {
    let doc = FixtureDocument::from_root(FixtureNode::new("body"));
    let engine = Engine::with_defaults();

    assert!(!engine.run(&doc, Action::NextConversation));
    assert!(!engine.run(&doc, Action::PreviousConversation));
    assert!(!engine.run(&doc, Action::SwitchConversation(0)));
    assert!(doc.effects().is_empty());
}

#[test]
fn escape_from_focused_search_returns_to_composer() {
    let doc = chat_document();
    let engine = Engine::with_defaults();
    doc.set_focused(Some(SEARCH));

    assert!(engine.dispatch(&doc, &ShortcutMessage::new("escape")));
    assert_eq!(
        doc.effects(),
        vec![
            SideEffect::Blur(SEARCH),
            SideEffect::Focus(COMPOSER),
            SideEffect::Click(COMPOSER),
        ]
    );
    assert_eq!(doc.focused(), Some(COMPOSER));
}

#[test]
fn escape_without_search_focus_just_focuses_composer() {
    let doc = chat_document();
    let engine = Engine::with_defaults();

    assert!(engine.dispatch(&doc, &ShortcutMessage::new("escape")));
    assert_eq!(
        doc.effects(),
        vec![SideEffect::Focus(COMPOSER), SideEffect::Click(COMPOSER)]
    );
}

#[test]
fn unknown_action_is_ignored() {
    let doc = chat_document();
    let engine = Engine::with_defaults();

    assert!(!engine.dispatch(&doc, &ShortcutMessage::new("open-settings")));
    assert!(doc.effects().is_empty());
}

struct AlwaysErr;

impl Strategy for AlwaysErr {
    fn name(&self) -> &str {
        "always_err"
    }

    fn run(&self, _doc: &dyn Document) -> Result<Vec<NodeId>, StrategyError> {
        Err(StrategyError::QueryFailed("synthetic".into()))
    }
}

#[test]
fn erroring_strategies_never_cross_the_action_boundary() {
    let doc = chat_document();

    let mut set = StrategySet::new();
    set.set(
        LogicalKey::MessageInput,
        vec![Box::new(AlwaysErr), Box::new(AlwaysErr)],
    );
    let engine = Engine::new(Resolver::new(set), Default::default());

    assert!(!engine.dispatch(&doc, &ShortcutMessage::new("focus-message-input")));
    assert!(doc.effects().is_empty());
}

#[test]
fn raw_candidates_all_rejected_is_a_clean_failure() {
    // Thread-like links that are all icon-sized: found by the href strategy,
    // rejected by the validator.
    let doc = FixtureDocument::from_root(
        FixtureNode::new("body").children(vec![
            FixtureNode::new("a")
                .attr("href", "/t/1")
                .text("x")
                .rect(Rect::sized(20.0, 20.0)),
            FixtureNode::new("a")
                .attr("href", "/t/2")
                .text("y")
                .rect(Rect::sized(20.0, 20.0)),
        ]),
    );
    let engine = Engine::with_defaults();

    assert!(!engine.run(&doc, Action::SwitchConversation(0)));
    assert!(doc.effects().is_empty());
}

#[test]
fn resolver_memoizes_across_dispatches() {
    let doc = chat_document();
    let engine = Engine::with_defaults();

    assert!(engine.dispatch(&doc, &ShortcutMessage::new("focus-search")));
    assert_eq!(
        engine.resolver().cached_strategy(LogicalKey::SearchInput),
        Some("search_aria_exact")
    );

    assert!(engine.dispatch(&doc, &ShortcutMessage::new("focus-search")));
    assert_eq!(
        engine.resolver().cached_strategy(LogicalKey::SearchInput),
        Some("search_aria_exact")
    );
}

#[test]
fn default_strategy_table_resolves_every_key() {
    let doc = chat_document();
    let resolver = Resolver::new(strategies::messenger_set());

    assert_eq!(resolver.resolve_one(&doc, LogicalKey::SearchInput), Some(SEARCH));
    assert_eq!(
        resolver.resolve_one(&doc, LogicalKey::MessageInput),
        Some(COMPOSER)
    );
    assert_eq!(
        resolver.resolve_many(&doc, LogicalKey::ConversationList),
        vec![ALICE, BOB, CAROL]
    );
    assert_eq!(
        resolver.resolve_one(&doc, LogicalKey::ActiveConversation),
        Some(BOB)
    );
}
