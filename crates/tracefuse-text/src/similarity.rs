//! Similarity measures between phrase mappings and between noun mappings

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{NounMappingId, Phrase, PhraseMappingId, TextState};

/// How the pairwise phrase similarities of two phrase mappings are folded
/// into one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseMappingAggregatorStrategy {
    /// Most similar phrase pair
    #[default]
    MaxSimilarity,
    /// Mean over all phrase pairs
    AverageSimilarity,
    /// Least similar phrase pair
    MinSimilarity,
}

impl PhraseMappingAggregatorStrategy {
    /// Fold pairwise similarities; 0 when there are none
    pub fn apply(&self, similarities: &[f64]) -> f64 {
        if similarities.is_empty() {
            return 0.0;
        }
        match self {
            PhraseMappingAggregatorStrategy::MaxSimilarity => similarities.iter().copied().fold(f64::MIN, f64::max),
            PhraseMappingAggregatorStrategy::MinSimilarity => similarities.iter().copied().fold(f64::MAX, f64::min),
            PhraseMappingAggregatorStrategy::AverageSimilarity => {
                similarities.iter().sum::<f64>() / similarities.len() as f64
            }
        }
    }

    /// Snake-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            PhraseMappingAggregatorStrategy::MaxSimilarity => "max_similarity",
            PhraseMappingAggregatorStrategy::AverageSimilarity => "average_similarity",
            PhraseMappingAggregatorStrategy::MinSimilarity => "min_similarity",
        }
    }
}

impl fmt::Display for PhraseMappingAggregatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhraseMappingAggregatorStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "max_similarity" | "max" => Ok(PhraseMappingAggregatorStrategy::MaxSimilarity),
            "average_similarity" | "avg" | "average" => Ok(PhraseMappingAggregatorStrategy::AverageSimilarity),
            "min_similarity" | "min" => Ok(PhraseMappingAggregatorStrategy::MinSimilarity),
            _ => Err(format!("Invalid phrase mapping aggregator: {}", s)),
        }
    }
}

/// Similarity oracle used by the consolidator
///
/// Both measures must be symmetric. Unknown ids are dissimilar.
pub trait SimilarityProvider {
    /// Similarity of two phrase mappings in [0, 1]
    fn phrase_mapping_similarity(&self, state: &TextState, a: PhraseMappingId, b: PhraseMappingId) -> f64;

    /// Whether two noun mappings denote the same concept
    fn are_noun_mappings_similar(&self, state: &TextState, a: NounMappingId, b: NounMappingId) -> bool;
}

/// Word-vector cosine for phrases, normalized Levenshtein for nouns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalSimilarity {
    /// Folding of pairwise phrase cosines
    pub aggregator: PhraseMappingAggregatorStrategy,
    /// Minimum normalized Levenshtein similarity of two surface forms
    pub noun_similarity_threshold: f64,
}

impl Default for LexicalSimilarity {
    fn default() -> Self {
        Self {
            aggregator: PhraseMappingAggregatorStrategy::MaxSimilarity,
            noun_similarity_threshold: 0.85,
        }
    }
}

impl LexicalSimilarity {
    /// Create a provider
    pub fn new(aggregator: PhraseMappingAggregatorStrategy, noun_similarity_threshold: f64) -> Self {
        Self {
            aggregator,
            noun_similarity_threshold,
        }
    }

    /// Whether two surface forms are close enough, ignoring case
    pub fn are_words_similar(&self, a: &str, b: &str) -> bool {
        let a = a.to_lowercase();
        let b = b.to_lowercase();
        a == b || strsim::normalized_levenshtein(&a, &b) >= self.noun_similarity_threshold
    }
}

impl SimilarityProvider for LexicalSimilarity {
    fn phrase_mapping_similarity(&self, state: &TextState, a: PhraseMappingId, b: PhraseMappingId) -> f64 {
        let (Some(first), Some(second)) = (state.phrase_mapping(a), state.phrase_mapping(b)) else {
            return 0.0;
        };

        let mut similarities = Vec::with_capacity(first.phrases().len() * second.phrases().len());
        for left in first.phrases() {
            for right in second.phrases() {
                similarities.push(phrase_cosine(left, right));
            }
        }
        self.aggregator.apply(&similarities)
    }

    fn are_noun_mappings_similar(&self, state: &TextState, a: NounMappingId, b: NounMappingId) -> bool {
        let (Some(first), Some(second)) = (state.noun_mapping(a), state.noun_mapping(b)) else {
            return false;
        };

        first
            .surface_forms()
            .iter()
            .any(|left| second.surface_forms().iter().any(|right| self.are_words_similar(left, right)))
    }
}

/// Cosine similarity of the word-count vectors of two phrases
pub fn phrase_cosine(a: &Phrase, b: &Phrase) -> f64 {
    cosine(&a.phrase_vector(), &b.phrase_vector())
}

fn cosine(a: &BTreeMap<String, usize>, b: &BTreeMap<String, usize>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(word, count)| b.get(word).map(|other| (*count * *other) as f64))
        .sum();
    let norm_a = a.values().map(|c| (*c * *c) as f64).sum::<f64>().sqrt();
    let norm_b = b.values().map(|c| (*c * *c) as f64).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NounMapping, PhraseMapping};
    use tracefuse_domain::Claimant;

    #[test]
    fn test_cosine_of_identical_and_disjoint_phrases() {
        let a = Phrase::new("the database server", 1);
        let b = Phrase::new("The Database Server", 3);
        let c = Phrase::new("a cache", 2);

        assert!((phrase_cosine(&a, &b) - 1.0).abs() < 1e-12);
        assert_eq!(phrase_cosine(&a, &c), 0.0);
        assert_eq!(phrase_cosine(&a, &Phrase::new("", 1)), 0.0);
    }

    #[test]
    fn test_cosine_partial_overlap() {
        let a = Phrase::new("database server", 1);
        let b = Phrase::new("the database server", 2);
        let expected = 2.0 / (2.0_f64.sqrt() * 3.0_f64.sqrt());
        assert!((phrase_cosine(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_aggregator_strategies() {
        let values = [0.2, 0.8, 0.5];
        assert_eq!(PhraseMappingAggregatorStrategy::MaxSimilarity.apply(&values), 0.8);
        assert_eq!(PhraseMappingAggregatorStrategy::MinSimilarity.apply(&values), 0.2);
        assert!((PhraseMappingAggregatorStrategy::AverageSimilarity.apply(&values) - 0.5).abs() < 1e-12);
        assert_eq!(PhraseMappingAggregatorStrategy::MaxSimilarity.apply(&[]), 0.0);
    }

    #[test]
    fn test_parse_aggregator() {
        assert_eq!("MAX_SIMILARITY".parse(), Ok(PhraseMappingAggregatorStrategy::MaxSimilarity));
        assert_eq!("avg".parse(), Ok(PhraseMappingAggregatorStrategy::AverageSimilarity));
        assert!("median".parse::<PhraseMappingAggregatorStrategy>().is_err());
    }

    #[test]
    fn test_phrase_mapping_similarity_uses_aggregator() {
        let claimant = Claimant::new("extractor");
        let mut state = TextState::new();
        let a = state.add_phrase_mapping(PhraseMapping::new(
            vec![Phrase::new("the cache", 1), Phrase::new("a store", 2)],
            claimant.clone(),
        ));
        let b = state.add_phrase_mapping(PhraseMapping::new(vec![Phrase::new("the cache", 3)], claimant));

        let max = LexicalSimilarity::new(PhraseMappingAggregatorStrategy::MaxSimilarity, 0.85);
        let min = LexicalSimilarity::new(PhraseMappingAggregatorStrategy::MinSimilarity, 0.85);

        assert!((max.phrase_mapping_similarity(&state, a, b) - 1.0).abs() < 1e-12);
        assert_eq!(min.phrase_mapping_similarity(&state, a, b), 0.0);
        assert_eq!(
            max.phrase_mapping_similarity(&state, a, b),
            max.phrase_mapping_similarity(&state, b, a)
        );
    }

    #[test]
    fn test_noun_similarity() {
        let mut state = TextState::new();
        let server = state.add_noun_mapping(NounMapping::new("server", 1)).unwrap();
        let servers = state.add_noun_mapping(NounMapping::new("Servers", 2)).unwrap();
        let cache = state.add_noun_mapping(NounMapping::new("cache", 3)).unwrap();

        let similarity = LexicalSimilarity::default();
        assert!(similarity.are_noun_mappings_similar(&state, server, servers));
        assert!(similarity.are_noun_mappings_similar(&state, servers, server));
        assert!(!similarity.are_noun_mappings_similar(&state, server, cache));

        state.remove_noun_mapping(cache).unwrap();
        assert!(!similarity.are_noun_mappings_similar(&state, server, cache));
    }
}
