//! Inconsistency detection error types

use thiserror::Error;

/// Errors raised while configuring inconsistency detection
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InconsistencyError {
    /// A whitelist pattern is not a valid regular expression
    #[error("Invalid whitelist pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
