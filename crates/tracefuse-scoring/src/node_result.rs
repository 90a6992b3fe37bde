//! Per-candidate-pair confidence tables

use std::collections::BTreeMap;

use tracefuse_domain::{Confidence, DomainError, EndpointPair};

/// Confidence per endpoint pair, as produced by one scoring-tree node
///
/// Keys are unique. Adding a pair that is already present fuses the two
/// confidences instead of overwriting. Lookups of absent pairs read as
/// "no evidence".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeResult {
    confidences: BTreeMap<EndpointPair, Confidence>,
}

impl NodeResult {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a confidence for a pair, merging with an existing entry
    pub fn add(&mut self, pair: EndpointPair, confidence: Confidence) -> Result<(), DomainError> {
        match self.confidences.get_mut(&pair) {
            Some(existing) => existing.merge(&confidence),
            None => {
                self.confidences.insert(pair, confidence);
                Ok(())
            }
        }
    }

    /// Fold every entry of another result into this one
    pub fn absorb(&mut self, other: NodeResult) -> Result<(), DomainError> {
        for (pair, confidence) in other.confidences {
            self.add(pair, confidence)?;
        }
        Ok(())
    }

    /// Confidence for a pair, if the pair was scored
    pub fn get(&self, pair: &EndpointPair) -> Option<&Confidence> {
        self.confidences.get(pair)
    }

    /// Aggregated value for a pair; 0 for pairs that were never scored
    pub fn value_of(&self, pair: &EndpointPair) -> f64 {
        self.confidences.get(pair).map_or(0.0, Confidence::value)
    }

    /// Whether the pair was scored
    pub fn contains(&self, pair: &EndpointPair) -> bool {
        self.confidences.contains_key(pair)
    }

    /// Scored pairs in ascending order
    pub fn pairs(&self) -> impl Iterator<Item = &EndpointPair> + '_ {
        self.confidences.keys()
    }

    /// Entries in ascending pair order
    pub fn iter(&self) -> impl Iterator<Item = (&EndpointPair, &Confidence)> + '_ {
        self.confidences.iter()
    }

    /// Number of scored pairs
    pub fn len(&self) -> usize {
        self.confidences.len()
    }

    /// True when nothing was scored
    pub fn is_empty(&self) -> bool {
        self.confidences.is_empty()
    }
}
