//! Scoring error types

use thiserror::Error;
use tracefuse_domain::DomainError;

use crate::NodeId;

/// Errors that can occur while building or evaluating a scoring tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Confidence fusion failed (out-of-range probability or function mismatch)
    #[error("Confidence error: {0}")]
    Domain(#[from] DomainError),

    /// A node id does not belong to this tree
    #[error("Unknown scoring node: {0}")]
    UnknownNode(NodeId),

    /// An aggregation node was wired without children
    #[error("Aggregation node has no children")]
    EmptyAggregation,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
