//! Error types for sequencing runs.
//!
//! Only configuration problems surface as errors. Degenerate numeric
//! situations (zero-weight transitions, zero-cost edges) are recovered
//! locally inside the search and never reach the caller.

use thiserror::Error;

/// Errors reported before any search begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequencerError {
    /// The job list was empty; at least one job is required.
    #[error("job list is empty")]
    EmptyJobs,
    /// Profitability mode string did not name a known mode.
    #[error("invalid profitability mode: '{0}' (expected off, high or low)")]
    InvalidProfitabilityMode(String),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Machine assignment needs at least one machine.
    #[error("machine count must be at least 1")]
    InvalidMachineCount,
    /// Configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SequencerError {
    fn from(err: serde_json::Error) -> Self {
        SequencerError::Parse(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SequencerError>;
