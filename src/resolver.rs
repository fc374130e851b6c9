//! Multi-strategy element resolution with per-key memoization.
//!
//! The host document has no identifier contract and mutates across
//! unannounced releases, so every logical target is looked up through an
//! ordered list of strategies ranked from most to least semantically stable.
//! The last strategy that succeeded for a key is remembered and tried first
//! on the next call; a stale entry is detected lazily (it stops matching or
//! its result stops being visible) and resolution falls through to the full
//! ordered list.

pub mod strategies;
pub mod strategy;

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::dom::Document;
use crate::resolver::strategy::StrategySet;
use crate::types::{LogicalKey, NodeId};

/// Resolves logical keys to document nodes.
///
/// One instance per active document session; the memoization cache is the
/// only mutable state and sits behind a single mutex, so resolution is safe
/// to call from concurrent contexts even though the expected call pattern is
/// strictly sequential.
pub struct Resolver {
    set: StrategySet,
    cache: Mutex<HashMap<LogicalKey, usize>>,
}

impl Resolver {
    pub fn new(set: StrategySet) -> Self {
        Self {
            set,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn strategy_set(&self) -> &StrategySet {
        &self.set
    }

    /// Name of the memoized strategy for a key, if any.
    pub fn cached_strategy(&self, key: LogicalKey) -> Option<&str> {
        let index = *self.cache.lock().get(&key)?;
        self.set.for_key(key).get(index).map(|s| s.name())
    }

    /// Resolve a singular key to a visible node.
    ///
    /// The memoized strategy is tried first; on miss, strategies run in
    /// priority order and the first one yielding a visible node wins and is
    /// memoized. Strategy errors are recovered here and never escape.
    pub fn resolve_one(&self, doc: &dyn Document, key: LogicalKey) -> Option<NodeId> {
        let strategies = self.set.for_key(key);

        let cached = self.cache.lock().get(&key).copied();
        if let Some(index) = cached {
            if let Some(strategy) = strategies.get(index) {
                if let Ok(nodes) = strategy.run(doc) {
                    if let Some(node) = nodes.first().copied() {
                        if doc.is_visible(node) {
                            return Some(node);
                        }
                    }
                }
                // Cache went stale; fall through to the ordered list.
            }
        }

        for (index, strategy) in strategies.iter().enumerate() {
            match strategy.run(doc) {
                Ok(nodes) => {
                    if let Some(node) = nodes.first().copied() {
                        if doc.is_visible(node) {
                            debug!(key = %key, strategy = strategy.name(), "strategy succeeded");
                            self.cache.lock().insert(key, index);
                            return Some(node);
                        }
                    }
                }
                Err(e) => {
                    debug!(key = %key, strategy = strategy.name(), error = %e, "strategy failed");
                }
            }
        }

        warn!(key = %key, "could not find element");
        None
    }

    /// Resolve a list-valued key to its candidate sequence.
    ///
    /// The first strategy whose result is non-empty is accepted. No
    /// memoization: list membership must reflect the current document state
    /// on every call. Visibility of individual members is the caller's
    /// concern.
    pub fn resolve_many(&self, doc: &dyn Document, key: LogicalKey) -> Vec<NodeId> {
        for strategy in self.set.for_key(key) {
            match strategy.run(doc) {
                Ok(nodes) if !nodes.is_empty() => {
                    debug!(
                        key = %key,
                        strategy = strategy.name(),
                        count = nodes.len(),
                        "strategy succeeded"
                    );
                    return nodes;
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(key = %key, strategy = strategy.name(), error = %e, "strategy failed");
                }
            }
        }

        warn!(key = %key, "could not find elements");
        Vec::new()
    }
}
