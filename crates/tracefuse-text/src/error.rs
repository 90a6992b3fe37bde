//! Text state error types

use thiserror::Error;
use tracefuse_domain::DomainError;

use crate::{NounMappingId, PhraseMappingId};

/// Errors raised while editing or consolidating a text state
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextError {
    /// Phrase mapping id not present in the state
    #[error("Unknown phrase mapping: {0}")]
    UnknownPhraseMapping(PhraseMappingId),

    /// Noun mapping id not present in the state
    #[error("Unknown noun mapping: {0}")]
    UnknownNounMapping(NounMappingId),

    /// Confidence fusion failed
    #[error("Confidence error: {0}")]
    Domain(#[from] DomainError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
