//! Configuration for mapping consolidation

use serde::{Deserialize, Serialize};

use crate::{LexicalSimilarity, PhraseMappingAggregatorStrategy, TextError};

/// Configuration for [`MappingConsolidator`](crate::MappingConsolidator)
///
/// # Examples
///
/// ```
/// use tracefuse_text::ConsolidationConfig;
///
/// let config = ConsolidationConfig::default();
/// assert_eq!(config.min_cosine_similarity, 0.4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// Phrase mappings must be strictly more similar than this to be compared
    pub min_cosine_similarity: f64,

    /// Folding of pairwise phrase similarities
    pub aggregator: PhraseMappingAggregatorStrategy,

    /// Minimum normalized Levenshtein similarity for two nouns to match
    pub noun_similarity_threshold: f64,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            min_cosine_similarity: 0.4,
            aggregator: PhraseMappingAggregatorStrategy::MaxSimilarity,
            noun_similarity_threshold: 0.85,
        }
    }
}

impl ConsolidationConfig {
    /// Strict preset: merge only near-identical mappings
    pub fn strict() -> Self {
        Self {
            min_cosine_similarity: 0.7,
            aggregator: PhraseMappingAggregatorStrategy::AverageSimilarity,
            noun_similarity_threshold: 0.95,
        }
    }

    /// Lenient preset: merge loosely related mappings
    pub fn lenient() -> Self {
        Self {
            min_cosine_similarity: 0.25,
            aggregator: PhraseMappingAggregatorStrategy::MaxSimilarity,
            noun_similarity_threshold: 0.75,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TextError> {
        if !(0.0..=1.0).contains(&self.min_cosine_similarity) {
            return Err(TextError::Config(format!(
                "min_cosine_similarity {} must be within [0.0, 1.0]",
                self.min_cosine_similarity
            )));
        }
        if !(0.0..=1.0).contains(&self.noun_similarity_threshold) {
            return Err(TextError::Config(format!(
                "noun_similarity_threshold {} must be within [0.0, 1.0]",
                self.noun_similarity_threshold
            )));
        }
        Ok(())
    }

    /// Similarity provider matching this configuration
    pub fn similarity(&self) -> LexicalSimilarity {
        LexicalSimilarity::new(self.aggregator, self.noun_similarity_threshold)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, TextError> {
        toml::from_str(toml_str).map_err(|e| TextError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, TextError> {
        toml::to_string_pretty(self).map_err(|e| TextError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
