//! Domain error types

use thiserror::Error;

use crate::AggregationFunction;

/// Errors raised by domain value objects
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// An argument was outside its permitted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two values built with different aggregation functions were combined
    #[error("Configuration mismatch: expected {expected}, found {found}")]
    ConfigurationMismatch {
        /// Aggregation function of the receiving side
        expected: AggregationFunction,
        /// Aggregation function of the other side
        found: AggregationFunction,
    },
}
