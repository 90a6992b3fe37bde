//! Similarity-driven consolidation of phrase and noun mappings
//!
//! For every phrase mapping P, the other phrase mappings that are strictly
//! more similar than the configured threshold are visited in id order:
//!
//! - If a candidate Q carries the same phrase texts as P (as a multiset),
//!   every noun mapping of Q is merged into each similar noun mapping of P.
//!   No counting rules apply.
//! - Otherwise P and Q are merged only when they have the same, non-zero
//!   number of noun mappings and those noun mappings pair up one-to-one:
//!   every noun mapping on either side has exactly one similar partner on the
//!   other side. A noun mapping with several similar partners makes the
//!   candidate ambiguous and it is skipped.
//!
//! Iteration runs over the phrase mapping ids present when the pass starts;
//! mappings merged away during the pass are not visited again.

use std::collections::BTreeSet;
use std::time::Instant;

use tracefuse_domain::Claimant;
use tracing::debug;

use crate::{
    ConsolidationConfig, ConsolidationMetrics, DefaultMergeStrategy, MergeStrategy, NounMappingId, PhraseMappingId,
    SimilarityProvider, TextError, TextState,
};

/// Partner search result for one noun mapping
enum Partner {
    Unique(NounMappingId),
    Ambiguous,
    Missing,
}

/// Merges near-duplicate phrase mappings and their noun mappings
#[derive(Debug, Clone)]
pub struct MappingConsolidator {
    config: ConsolidationConfig,
    claimant: Claimant,
}

impl MappingConsolidator {
    /// Claimant recorded on everything this consolidator merges
    pub const CLAIMANT: &'static str = "MappingConsolidator";

    /// Create a consolidator
    pub fn new(config: ConsolidationConfig) -> Result<Self, TextError> {
        config.validate()?;
        Ok(Self {
            config,
            claimant: Claimant::new(Self::CLAIMANT),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ConsolidationConfig {
        &self.config
    }

    /// Identity recorded as provenance of merges
    pub fn claimant(&self) -> &Claimant {
        &self.claimant
    }

    /// Run one pass with lexical similarity and the default merge strategy
    pub fn consolidate(&self, state: &mut TextState) -> Result<ConsolidationMetrics, TextError> {
        let similarity = self.config.similarity();
        self.consolidate_with(state, &similarity, &DefaultMergeStrategy)
    }

    /// Run one pass with the given collaborators
    pub fn consolidate_with<S, M>(
        &self,
        state: &mut TextState,
        similarity: &S,
        strategy: &M,
    ) -> Result<ConsolidationMetrics, TextError>
    where
        S: SimilarityProvider + ?Sized,
        M: MergeStrategy + ?Sized,
    {
        let start = Instant::now();
        let snapshot = state.phrase_mapping_ids();
        let mut metrics = ConsolidationMetrics::new();

        for &phrase_mapping in &snapshot {
            if !state.contains_phrase_mapping(phrase_mapping) {
                continue;
            }
            metrics.phrase_mappings_examined += 1;

            let candidates = self.similar_phrase_mappings(state, similarity, phrase_mapping, &snapshot);
            for candidate in candidates {
                if !state.contains_phrase_mapping(phrase_mapping) || !state.contains_phrase_mapping(candidate) {
                    continue;
                }
                metrics.candidates_considered += 1;

                if have_equal_texts(state, phrase_mapping, candidate) {
                    metrics.noun_merges +=
                        self.merge_equal_text_nouns(state, similarity, strategy, phrase_mapping, candidate)?;
                    continue;
                }

                self.merge_if_bijective(state, similarity, strategy, phrase_mapping, candidate, &mut metrics)?;
            }
        }

        tracing::info!(
            examined = metrics.phrase_mappings_examined,
            phrase_merges = metrics.phrase_merges,
            noun_merges = metrics.noun_merges,
            skipped = metrics.total_skips(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Mapping consolidation finished"
        );
        Ok(metrics)
    }

    fn similar_phrase_mappings<S>(
        &self,
        state: &TextState,
        similarity: &S,
        phrase_mapping: PhraseMappingId,
        snapshot: &[PhraseMappingId],
    ) -> Vec<PhraseMappingId>
    where
        S: SimilarityProvider + ?Sized,
    {
        snapshot
            .iter()
            .copied()
            .filter(|other| *other != phrase_mapping && state.contains_phrase_mapping(*other))
            .filter(|other| {
                similarity.phrase_mapping_similarity(state, phrase_mapping, *other) > self.config.min_cosine_similarity
            })
            .collect()
    }

    fn merge_equal_text_nouns<S, M>(
        &self,
        state: &mut TextState,
        similarity: &S,
        strategy: &M,
        phrase_mapping: PhraseMappingId,
        candidate: PhraseMappingId,
    ) -> Result<usize, TextError>
    where
        S: SimilarityProvider + ?Sized,
        M: MergeStrategy + ?Sized,
    {
        let mut merges = 0;

        for merged in state.noun_mappings_by_phrase_mapping(candidate) {
            for kept in state.noun_mappings_by_phrase_mapping(phrase_mapping) {
                if kept == merged || !state.contains_noun_mapping(kept) || !state.contains_noun_mapping(merged) {
                    continue;
                }
                if similarity.are_noun_mappings_similar(state, kept, merged) {
                    let before = state.noun_mapping_count();
                    strategy.merge_noun_mappings(state, kept, merged, &self.claimant)?;
                    merges += before.saturating_sub(state.noun_mapping_count());
                }
            }
        }

        if merges > 0 {
            debug!(
                phrase_mapping = %phrase_mapping,
                candidate = %candidate,
                merges,
                "Merged noun mappings of phrase mappings with equal text"
            );
        }
        Ok(merges)
    }

    fn merge_if_bijective<S, M>(
        &self,
        state: &mut TextState,
        similarity: &S,
        strategy: &M,
        phrase_mapping: PhraseMappingId,
        candidate: PhraseMappingId,
        metrics: &mut ConsolidationMetrics,
    ) -> Result<(), TextError>
    where
        S: SimilarityProvider + ?Sized,
        M: MergeStrategy + ?Sized,
    {
        let own = state.noun_mappings_by_phrase_mapping(phrase_mapping);
        let theirs = state.noun_mappings_by_phrase_mapping(candidate);

        if own.len() != theirs.len() {
            metrics.size_mismatch_skips += 1;
            return Ok(());
        }

        let mut ambiguous = false;

        let mut pairs = Vec::with_capacity(own.len());
        for &noun in &own {
            match unique_partner(state, similarity, noun, &theirs) {
                Partner::Unique(partner) => pairs.push((noun, partner)),
                Partner::Ambiguous => ambiguous = true,
                Partner::Missing => {}
            }
        }

        let mut backward = 0;
        for &noun in &theirs {
            match unique_partner(state, similarity, noun, &own) {
                Partner::Unique(_) => backward += 1,
                Partner::Ambiguous => ambiguous = true,
                Partner::Missing => {}
            }
        }

        let distinct_partners: BTreeSet<NounMappingId> = pairs.iter().map(|(_, partner)| *partner).collect();
        // Partners are counted from both sides: every noun mapping of the
        // candidate must also find a unique partner among ours.
        let bijective = !own.is_empty()
            && distinct_partners.len() == own.len()
            && pairs.len() + backward == 2 * distinct_partners.len();

        if !bijective {
            if ambiguous {
                metrics.ambiguous_skips += 1;
            } else {
                metrics.unmatched_skips += 1;
            }
            debug!(
                phrase_mapping = %phrase_mapping,
                candidate = %candidate,
                ambiguous,
                "Noun mappings do not pair up, not merging"
            );
            return Ok(());
        }

        let phrase_mappings_before = state.phrase_mapping_count();
        let noun_mappings_before = state.noun_mapping_count();
        strategy.merge_phrase_mappings_and_noun_mappings(state, phrase_mapping, candidate, &pairs, &self.claimant)?;
        metrics.phrase_merges += phrase_mappings_before.saturating_sub(state.phrase_mapping_count());
        metrics.noun_merges += noun_mappings_before.saturating_sub(state.noun_mapping_count());
        Ok(())
    }
}

fn have_equal_texts(state: &TextState, a: PhraseMappingId, b: PhraseMappingId) -> bool {
    match (state.phrase_mapping(a), state.phrase_mapping(b)) {
        (Some(first), Some(second)) => first.sorted_texts() == second.sorted_texts(),
        _ => false,
    }
}

fn unique_partner<S>(state: &TextState, similarity: &S, noun: NounMappingId, candidates: &[NounMappingId]) -> Partner
where
    S: SimilarityProvider + ?Sized,
{
    let mut similar = candidates
        .iter()
        .copied()
        .filter(|candidate| similarity.are_noun_mappings_similar(state, noun, *candidate));

    match (similar.next(), similar.next()) {
        (Some(partner), None) => Partner::Unique(partner),
        (Some(_), Some(_)) => Partner::Ambiguous,
        (None, _) => Partner::Missing,
    }
}
