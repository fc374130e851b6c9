//! Chatnav: resilient keyboard navigation for an embedded chat document.
//!
//! Locates semantically-stable targets (search box, message composer,
//! conversation list, active conversation) inside a third-party document tree
//! that ships no identifier contract and mutates across unannounced releases,
//! and routes named shortcut actions to them. Resolution is strategy-ordered
//! with per-key memoization; every expected failure degrades to a logged
//! no-op rather than an error across the action boundary.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod logging;
pub mod nav;
pub mod resolver;
pub mod types;
