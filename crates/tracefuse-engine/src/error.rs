//! Engine error types

use thiserror::Error;
use tracefuse_domain::DomainError;
use tracefuse_inconsistency::InconsistencyError;
use tracefuse_scoring::ScoringError;
use tracefuse_text::TextError;

/// Errors that abort an engine run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Scoring tree construction or evaluation failed
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Text consolidation failed
    #[error("Text error: {0}")]
    Text(#[from] TextError),

    /// Inconsistency detection could not be set up
    #[error("Inconsistency error: {0}")]
    Inconsistency(#[from] InconsistencyError),

    /// Confidence fusion failed
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
