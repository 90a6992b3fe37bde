//! How mappings are merged inside a text state

use tracefuse_domain::Claimant;
use tracing::debug;

use crate::{NounMappingId, PhraseMappingId, TextError, TextState};

/// Merge operations the consolidator delegates to
///
/// Implementations must keep the provenance (claimants) of both sides and
/// must not duplicate surface forms, sentence positions or phrases the two
/// sides already share. The `merged` side is removed from the state.
pub trait MergeStrategy {
    /// Merge phrase mapping `merged` into `kept`, together with the given
    /// noun mapping pairs (`kept`-side noun first)
    fn merge_phrase_mappings_and_noun_mappings(
        &self,
        state: &mut TextState,
        kept: PhraseMappingId,
        merged: PhraseMappingId,
        noun_pairs: &[(NounMappingId, NounMappingId)],
        claimant: &Claimant,
    ) -> Result<(), TextError>;

    /// Merge noun mapping `merged` into `kept`
    fn merge_noun_mappings(
        &self,
        state: &mut TextState,
        kept: NounMappingId,
        merged: NounMappingId,
        claimant: &Claimant,
    ) -> Result<(), TextError>;
}

/// Union-based merging that keeps the first argument alive
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMergeStrategy;

impl MergeStrategy for DefaultMergeStrategy {
    fn merge_phrase_mappings_and_noun_mappings(
        &self,
        state: &mut TextState,
        kept: PhraseMappingId,
        merged: PhraseMappingId,
        noun_pairs: &[(NounMappingId, NounMappingId)],
        claimant: &Claimant,
    ) -> Result<(), TextError> {
        if kept == merged {
            return Ok(());
        }
        if !state.contains_phrase_mapping(kept) {
            return Err(TextError::UnknownPhraseMapping(kept));
        }

        let absorbed = state.remove_phrase_mapping(merged)?;
        let phrase_mapping = state.phrase_mapping_mut(kept)?;
        phrase_mapping.absorb(absorbed);
        phrase_mapping.add_claimant(claimant.clone());

        for noun in state.noun_mappings_by_phrase_mapping(merged) {
            state.noun_mapping_mut(noun)?.repoint(merged, kept);
        }

        for (kept_noun, merged_noun) in noun_pairs {
            if kept_noun == merged_noun
                || !state.contains_noun_mapping(*kept_noun)
                || !state.contains_noun_mapping(*merged_noun)
            {
                continue;
            }
            self.merge_noun_mappings(state, *kept_noun, *merged_noun, claimant)?;
        }

        debug!(kept = %kept, merged = %merged, nouns = noun_pairs.len(), "Merged phrase mappings");
        Ok(())
    }

    fn merge_noun_mappings(
        &self,
        state: &mut TextState,
        kept: NounMappingId,
        merged: NounMappingId,
        claimant: &Claimant,
    ) -> Result<(), TextError> {
        if kept == merged {
            return Ok(());
        }
        if !state.contains_noun_mapping(kept) {
            return Err(TextError::UnknownNounMapping(kept));
        }

        let absorbed = state.remove_noun_mapping(merged)?;
        let noun_mapping = state.noun_mapping_mut(kept)?;
        noun_mapping.absorb(absorbed)?;
        noun_mapping.add_claimant(claimant.clone());

        debug!(kept = %kept, merged = %merged, "Merged noun mappings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NounMapping, Phrase, PhraseMapping};

    fn extractor() -> Claimant {
        Claimant::new("extractor")
    }

    fn consolidator() -> Claimant {
        Claimant::new("MappingConsolidator")
    }

    #[test]
    fn test_merge_noun_mappings_unions_and_removes() {
        let mut state = TextState::new();
        let a = state
            .add_noun_mapping(NounMapping::new("server", 1).with_claim(Claimant::new("ner"), 0.9).unwrap())
            .unwrap();
        let b = state
            .add_noun_mapping(NounMapping::new("servers", 1).with_claim(Claimant::new("pos"), 0.5).unwrap())
            .unwrap();

        DefaultMergeStrategy.merge_noun_mappings(&mut state, a, b, &consolidator()).unwrap();

        assert!(!state.contains_noun_mapping(b));
        let kept = state.noun_mapping(a).unwrap();
        assert_eq!(kept.surface_forms().len(), 2);
        assert_eq!(kept.sentence_positions().len(), 1);
        assert!(kept.claimants().contains(&Claimant::new("ner")));
        assert!(kept.claimants().contains(&Claimant::new("pos")));
        assert!(kept.claimants().contains(&consolidator()));
        assert!((kept.confidence().value() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_merge_into_unknown_noun_mapping_leaves_state_untouched() {
        let mut state = TextState::new();
        let a = state.add_noun_mapping(NounMapping::new("server", 1)).unwrap();
        let b = state.add_noun_mapping(NounMapping::new("servers", 2)).unwrap();
        state.remove_noun_mapping(a).unwrap();

        let err = DefaultMergeStrategy.merge_noun_mappings(&mut state, a, b, &consolidator());
        assert_eq!(err, Err(TextError::UnknownNounMapping(a)));
        assert!(state.contains_noun_mapping(b));
    }

    #[test]
    fn test_merge_phrase_mappings_repoints_membership() {
        let mut state = TextState::new();
        let p = state.add_phrase_mapping(PhraseMapping::new(vec![Phrase::new("the server", 1)], extractor()));
        let q = state.add_phrase_mapping(PhraseMapping::new(
            vec![Phrase::new("the servers", 2), Phrase::new("the server", 1)],
            Claimant::new("other-extractor"),
        ));

        let n = state.add_noun_mapping(NounMapping::new("server", 1).in_phrase_mapping(p)).unwrap();
        let m = state.add_noun_mapping(NounMapping::new("servers", 2).in_phrase_mapping(q)).unwrap();
        let shared = state
            .add_noun_mapping(NounMapping::new("the", 1).in_phrase_mapping(p).in_phrase_mapping(q))
            .unwrap();

        DefaultMergeStrategy
            .merge_phrase_mappings_and_noun_mappings(&mut state, p, q, &[(n, m)], &consolidator())
            .unwrap();

        assert!(!state.contains_phrase_mapping(q));
        assert!(!state.contains_noun_mapping(m));

        let kept = state.phrase_mapping(p).unwrap();
        assert_eq!(kept.phrases().len(), 2);
        assert_eq!(kept.claimants().len(), 3);

        assert_eq!(state.noun_mappings_by_phrase_mapping(p), vec![n, shared]);
        assert!(state.noun_mappings_by_phrase_mapping(q).is_empty());
        assert_eq!(state.noun_mapping(shared).unwrap().phrase_mappings().len(), 1);
    }
}
