//! Arena owning all phrase and noun mappings of one text

use std::collections::BTreeMap;

use crate::{NounMapping, NounMappingId, PhraseMapping, PhraseMappingId, TextError};

/// Sole owner of the phrase and noun mappings of one document
///
/// Mappings are addressed by ids that stay valid until the mapping is
/// removed. Ids are never reused within one state, and iteration is always in
/// id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextState {
    phrase_mappings: BTreeMap<PhraseMappingId, PhraseMapping>,
    noun_mappings: BTreeMap<NounMappingId, NounMapping>,
    next_phrase_mapping: u32,
    next_noun_mapping: u32,
}

impl TextState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phrase mapping and return its id
    pub fn add_phrase_mapping(&mut self, mapping: PhraseMapping) -> PhraseMappingId {
        let id = PhraseMappingId(self.next_phrase_mapping);
        self.next_phrase_mapping += 1;
        self.phrase_mappings.insert(id, mapping);
        id
    }

    /// Add a noun mapping and return its id
    ///
    /// Every phrase mapping the noun mapping claims membership in must already
    /// be part of this state.
    pub fn add_noun_mapping(&mut self, mapping: NounMapping) -> Result<NounMappingId, TextError> {
        if let Some(missing) = mapping
            .phrase_mappings()
            .iter()
            .find(|id| !self.phrase_mappings.contains_key(*id))
        {
            return Err(TextError::UnknownPhraseMapping(*missing));
        }

        let id = NounMappingId(self.next_noun_mapping);
        self.next_noun_mapping += 1;
        self.noun_mappings.insert(id, mapping);
        Ok(id)
    }

    /// Look up a phrase mapping
    pub fn phrase_mapping(&self, id: PhraseMappingId) -> Option<&PhraseMapping> {
        self.phrase_mappings.get(&id)
    }

    /// Look up a noun mapping
    pub fn noun_mapping(&self, id: NounMappingId) -> Option<&NounMapping> {
        self.noun_mappings.get(&id)
    }

    /// Mutable access to a phrase mapping
    pub fn phrase_mapping_mut(&mut self, id: PhraseMappingId) -> Result<&mut PhraseMapping, TextError> {
        self.phrase_mappings
            .get_mut(&id)
            .ok_or(TextError::UnknownPhraseMapping(id))
    }

    /// Mutable access to a noun mapping
    pub fn noun_mapping_mut(&mut self, id: NounMappingId) -> Result<&mut NounMapping, TextError> {
        self.noun_mappings.get_mut(&id).ok_or(TextError::UnknownNounMapping(id))
    }

    /// Whether the phrase mapping is still part of the state
    pub fn contains_phrase_mapping(&self, id: PhraseMappingId) -> bool {
        self.phrase_mappings.contains_key(&id)
    }

    /// Whether the noun mapping is still part of the state
    pub fn contains_noun_mapping(&self, id: NounMappingId) -> bool {
        self.noun_mappings.contains_key(&id)
    }

    /// Remove a phrase mapping; noun mapping memberships are left untouched
    pub fn remove_phrase_mapping(&mut self, id: PhraseMappingId) -> Result<PhraseMapping, TextError> {
        self.phrase_mappings
            .remove(&id)
            .ok_or(TextError::UnknownPhraseMapping(id))
    }

    /// Remove a noun mapping
    pub fn remove_noun_mapping(&mut self, id: NounMappingId) -> Result<NounMapping, TextError> {
        self.noun_mappings.remove(&id).ok_or(TextError::UnknownNounMapping(id))
    }

    /// Snapshot of the current phrase mapping ids
    pub fn phrase_mapping_ids(&self) -> Vec<PhraseMappingId> {
        self.phrase_mappings.keys().copied().collect()
    }

    /// Snapshot of the current noun mapping ids
    pub fn noun_mapping_ids(&self) -> Vec<NounMappingId> {
        self.noun_mappings.keys().copied().collect()
    }

    /// Iterate phrase mappings in id order
    pub fn phrase_mappings(&self) -> impl Iterator<Item = (PhraseMappingId, &PhraseMapping)> + '_ {
        self.phrase_mappings.iter().map(|(id, m)| (*id, m))
    }

    /// Iterate noun mappings in id order
    pub fn noun_mappings(&self) -> impl Iterator<Item = (NounMappingId, &NounMapping)> + '_ {
        self.noun_mappings.iter().map(|(id, m)| (*id, m))
    }

    /// Noun mappings that belong to a phrase mapping, in id order
    pub fn noun_mappings_by_phrase_mapping(&self, id: PhraseMappingId) -> Vec<NounMappingId> {
        self.noun_mappings
            .iter()
            .filter(|(_, noun)| noun.belongs_to(id))
            .map(|(noun_id, _)| *noun_id)
            .collect()
    }

    /// Number of phrase mappings
    pub fn phrase_mapping_count(&self) -> usize {
        self.phrase_mappings.len()
    }

    /// Number of noun mappings
    pub fn noun_mapping_count(&self) -> usize {
        self.noun_mappings.len()
    }

    /// Whether the state holds no mappings at all
    pub fn is_empty(&self) -> bool {
        self.phrase_mappings.is_empty() && self.noun_mappings.is_empty()
    }
}
