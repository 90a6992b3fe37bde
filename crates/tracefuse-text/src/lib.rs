//! Tracefuse Text Layer
//!
//! Text-side state of trace link recovery: phrase mappings (co-referring
//! phrase occurrences) and noun mappings (co-referring single-token surface
//! forms) extracted from documentation, and the consolidation pass that
//! merges near-duplicates among them.
//!
//! ## Ownership
//!
//! [`TextState`] owns every mapping. Noun mappings record the phrase
//! mappings they belong to as [`PhraseMappingId`]s, so neither side holds a
//! reference to the other.
//!
//! ## Example
//!
//! ```
//! use tracefuse_domain::Claimant;
//! use tracefuse_text::{
//!     ConsolidationConfig, MappingConsolidator, NounMapping, Phrase, PhraseMapping, TextState,
//! };
//!
//! let extractor = Claimant::new("extractor");
//! let mut state = TextState::new();
//!
//! let p = state.add_phrase_mapping(PhraseMapping::new(vec![Phrase::new("database server", 1)], extractor.clone()));
//! let q = state.add_phrase_mapping(PhraseMapping::new(vec![Phrase::new("the database server", 2)], extractor));
//! state.add_noun_mapping(NounMapping::new("server", 1).in_phrase_mapping(p)).unwrap();
//! state.add_noun_mapping(NounMapping::new("servers", 2).in_phrase_mapping(q)).unwrap();
//!
//! let consolidator = MappingConsolidator::new(ConsolidationConfig::default()).unwrap();
//! let metrics = consolidator.consolidate(&mut state).unwrap();
//!
//! assert_eq!(metrics.phrase_merges, 1);
//! assert_eq!(state.phrase_mapping_count(), 1);
//! assert_eq!(state.noun_mapping_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod consolidator;
mod error;
mod mapping;
mod metrics;
mod similarity;
mod strategy;
mod text_state;

pub use config::ConsolidationConfig;
pub use consolidator::MappingConsolidator;
pub use error::TextError;
pub use mapping::{NounMapping, NounMappingId, Phrase, PhraseMapping, PhraseMappingId};
pub use metrics::ConsolidationMetrics;
pub use similarity::{phrase_cosine, LexicalSimilarity, PhraseMappingAggregatorStrategy, SimilarityProvider};
pub use strategy::{DefaultMergeStrategy, MergeStrategy};
pub use text_state::TextState;
