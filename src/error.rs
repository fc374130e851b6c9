//! Error types for the chatnav navigation core.
//!
//! The dispatch loop is crash-proof by design: expected absences (element not
//! found, index out of range, unknown action) are reported as `None`/`false`
//! sentinels and logged, never raised. The error types here cover the two
//! places real errors exist: inside a single strategy (recovered locally by
//! the resolver) and in the configuration/bootstrap layer (propagated with
//! `?` at startup only).

use thiserror::Error;

/// A single lookup strategy failed.
///
/// Recovered by the resolver, which moves on to the next strategy in priority
/// order; never surfaced past it.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("document capability unavailable")]
    CapabilityUnavailable,
}

/// Configuration and logging bootstrap errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fixture parsing errors (test doubles and the replay tool).
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("invalid fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
