//! Strategy capability and per-key strategy tables.

use std::collections::HashMap;

use crate::dom::{Document, Query};
use crate::error::StrategyError;
use crate::types::{LogicalKey, NodeId};

/// One concrete lookup technique for a logical key.
///
/// Strategies read the document and never mutate it. They return every match
/// in document order; singular keys use the first element. A strategy may
/// fail with `Err` without affecting later strategies — the resolver converts
/// failures into "try the next one".
pub trait Strategy: Send + Sync {
    /// Name used in diagnostics when this strategy wins or fails.
    fn name(&self) -> &str;

    /// All matching nodes in document order.
    fn run(&self, doc: &dyn Document) -> Result<Vec<NodeId>, StrategyError>;
}

/// A strategy that is a single structured query, no post-filtering.
pub struct QueryStrategy {
    name: &'static str,
    query: Query,
}

impl QueryStrategy {
    pub fn new(name: &'static str, query: Query) -> Self {
        Self { name, query }
    }
}

impl Strategy for QueryStrategy {
    fn name(&self) -> &str {
        self.name
    }

    fn run(&self, doc: &dyn Document) -> Result<Vec<NodeId>, StrategyError> {
        Ok(doc.select(&self.query))
    }
}

/// Ordered strategy table per logical key, fixed at configuration time.
///
/// Priority is list order: index 0 is tried first whenever there is no
/// memoized strategy for the key.
#[derive(Default)]
pub struct StrategySet {
    per_key: HashMap<LogicalKey, Vec<Box<dyn Strategy>>>,
}

impl StrategySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the strategy list for a key.
    pub fn set(&mut self, key: LogicalKey, strategies: Vec<Box<dyn Strategy>>) {
        self.per_key.insert(key, strategies);
    }

    /// Strategies for a key, in priority order. Empty if unconfigured.
    pub fn for_key(&self, key: LogicalKey) -> &[Box<dyn Strategy>] {
        self.per_key.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Strategy names for a key, for introspection and diagnostics.
    pub fn names(&self, key: LogicalKey) -> Vec<&str> {
        self.for_key(key).iter().map(|s| s.name()).collect()
    }
}
