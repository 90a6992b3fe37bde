//! Phrase and noun mappings extracted from documentation text

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracefuse_domain::{Claimant, Confidence, DomainError};

/// Stable identifier of a [`PhraseMapping`] inside a [`TextState`](crate::TextState)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhraseMappingId(pub(crate) u32);

impl fmt::Display for PhraseMappingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pm#{}", self.0)
    }
}

/// Stable identifier of a [`NounMapping`] inside a [`TextState`](crate::TextState)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NounMappingId(pub(crate) u32);

impl fmt::Display for NounMappingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nm#{}", self.0)
    }
}

/// One phrase occurrence in the text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phrase {
    /// Surface text as it appears in the sentence
    pub text: String,
    /// Sentence number (1-based in annotated input, opaque here)
    pub sentence: usize,
    /// Word tokens of the phrase
    pub words: Vec<String>,
}

impl Phrase {
    /// Create a phrase, tokenizing the text on whitespace
    pub fn new(text: impl Into<String>, sentence: usize) -> Self {
        let text = text.into();
        let words = text.split_whitespace().map(str::to_string).collect();
        Self { text, sentence, words }
    }

    /// Bag of lowercased words with their counts
    pub fn phrase_vector(&self) -> BTreeMap<String, usize> {
        let mut vector = BTreeMap::new();
        for word in &self.words {
            *vector.entry(word.to_lowercase()).or_insert(0) += 1;
        }
        vector
    }
}

/// Set of co-referring phrase occurrences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMapping {
    phrases: Vec<Phrase>,
    claimants: BTreeSet<Claimant>,
}

impl PhraseMapping {
    /// Create a mapping for the given phrases, claimed by one source
    pub fn new(phrases: Vec<Phrase>, claimant: Claimant) -> Self {
        let mut mapping = Self {
            phrases: Vec::new(),
            claimants: BTreeSet::from([claimant]),
        };
        for phrase in phrases {
            mapping.add_phrase(phrase);
        }
        mapping
    }

    /// Phrases in insertion order, without duplicates
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    /// Sources that contributed to this mapping
    pub fn claimants(&self) -> &BTreeSet<Claimant> {
        &self.claimants
    }

    /// Phrase texts, sorted so that two mappings can be compared as multisets
    pub fn sorted_texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = self.phrases.iter().map(|p| p.text.as_str()).collect();
        texts.sort_unstable();
        texts
    }

    /// Add a phrase unless an equal one is already present
    pub fn add_phrase(&mut self, phrase: Phrase) {
        if !self.phrases.contains(&phrase) {
            self.phrases.push(phrase);
        }
    }

    /// Record an additional source
    pub fn add_claimant(&mut self, claimant: Claimant) {
        self.claimants.insert(claimant);
    }

    /// Take over the phrases and claimants of another mapping
    pub fn absorb(&mut self, other: PhraseMapping) {
        for phrase in other.phrases {
            self.add_phrase(phrase);
        }
        self.claimants.extend(other.claimants);
    }
}

/// Set of co-referring single-token surface forms
///
/// Membership in phrase mappings is stored here as ids; the owning
/// [`TextState`](crate::TextState) resolves them.
#[derive(Debug, Clone, PartialEq)]
pub struct NounMapping {
    surface_forms: BTreeSet<String>,
    sentence_positions: BTreeSet<usize>,
    claimants: BTreeSet<Claimant>,
    confidence: Confidence,
    phrase_mappings: BTreeSet<PhraseMappingId>,
}

impl NounMapping {
    /// Create a mapping for one surface form seen in one sentence
    pub fn new(surface_form: impl Into<String>, sentence: usize) -> Self {
        Self {
            surface_forms: BTreeSet::from([surface_form.into()]),
            sentence_positions: BTreeSet::from([sentence]),
            claimants: BTreeSet::new(),
            confidence: Confidence::no_evidence(),
            phrase_mappings: BTreeSet::new(),
        }
    }

    /// Record a source's probability that this is a relevant noun
    pub fn with_claim(mut self, claimant: Claimant, probability: f64) -> Result<Self, DomainError> {
        self.confidence.add_observation(claimant.clone(), probability)?;
        self.claimants.insert(claimant);
        Ok(self)
    }

    /// Declare membership in a phrase mapping
    pub fn in_phrase_mapping(mut self, id: PhraseMappingId) -> Self {
        self.phrase_mappings.insert(id);
        self
    }

    /// Distinct surface forms
    pub fn surface_forms(&self) -> &BTreeSet<String> {
        &self.surface_forms
    }

    /// Sentences the surface forms occur in
    pub fn sentence_positions(&self) -> &BTreeSet<usize> {
        &self.sentence_positions
    }

    /// Sources that contributed to this mapping
    pub fn claimants(&self) -> &BTreeSet<Claimant> {
        &self.claimants
    }

    /// Fused probability of the contributing sources
    pub fn confidence(&self) -> &Confidence {
        &self.confidence
    }

    /// Phrase mappings this noun mapping belongs to
    pub fn phrase_mappings(&self) -> &BTreeSet<PhraseMappingId> {
        &self.phrase_mappings
    }

    /// Whether this noun mapping belongs to the given phrase mapping
    pub fn belongs_to(&self, id: PhraseMappingId) -> bool {
        self.phrase_mappings.contains(&id)
    }

    /// Record an additional source without a probability
    pub fn add_claimant(&mut self, claimant: Claimant) {
        self.claimants.insert(claimant);
    }

    /// Replace membership in `from` with membership in `to`
    pub fn repoint(&mut self, from: PhraseMappingId, to: PhraseMappingId) {
        if self.phrase_mappings.remove(&from) {
            self.phrase_mappings.insert(to);
        }
    }

    /// Take over everything another noun mapping knows
    ///
    /// Surface forms, sentence positions, claimants and memberships are
    /// unioned; confidences are merged with this side winning shared claimants.
    pub fn absorb(&mut self, other: NounMapping) -> Result<(), DomainError> {
        self.confidence.merge(&other.confidence)?;
        self.surface_forms.extend(other.surface_forms);
        self.sentence_positions.extend(other.sentence_positions);
        self.claimants.extend(other.claimants);
        self.phrase_mappings.extend(other.phrase_mappings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_vector_counts_lowercased_words() {
        let phrase = Phrase::new("The cache and the Store", 1);
        let vector = phrase.phrase_vector();

        assert_eq!(vector.get("the"), Some(&2));
        assert_eq!(vector.get("cache"), Some(&1));
        assert_eq!(vector.get("store"), Some(&1));
        assert_eq!(vector.len(), 4);
    }

    #[test]
    fn test_phrase_mapping_ignores_duplicate_phrases() {
        let mapping = PhraseMapping::new(
            vec![Phrase::new("the cache", 1), Phrase::new("the cache", 1), Phrase::new("the cache", 2)],
            Claimant::new("phrase-extractor"),
        );
        assert_eq!(mapping.phrases().len(), 2);
        assert_eq!(mapping.sorted_texts(), vec!["the cache", "the cache"]);
    }

    #[test]
    fn test_noun_mapping_claim_validates_probability() {
        let ok = NounMapping::new("cache", 1).with_claim(Claimant::new("ner"), 0.8);
        assert!(ok.is_ok());

        let err = NounMapping::new("cache", 1).with_claim(Claimant::new("ner"), 1.2);
        assert!(matches!(err, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn test_absorb_does_not_duplicate_shared_data() {
        let mut kept = NounMapping::new("cache", 1)
            .with_claim(Claimant::new("ner"), 0.8)
            .unwrap()
            .in_phrase_mapping(PhraseMappingId(0));
        let other = NounMapping::new("cache", 1)
            .with_claim(Claimant::new("pos"), 0.4)
            .unwrap()
            .in_phrase_mapping(PhraseMappingId(1));

        kept.absorb(other).unwrap();

        assert_eq!(kept.surface_forms().len(), 1);
        assert_eq!(kept.sentence_positions().len(), 1);
        assert_eq!(kept.claimants().len(), 2);
        assert_eq!(kept.phrase_mappings().len(), 2);
        assert!((kept.confidence().value() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_repoint_only_touches_existing_membership() {
        let mut noun = NounMapping::new("cache", 1).in_phrase_mapping(PhraseMappingId(3));
        noun.repoint(PhraseMappingId(7), PhraseMappingId(9));
        assert!(noun.belongs_to(PhraseMappingId(3)));
        assert!(!noun.belongs_to(PhraseMappingId(9)));

        noun.repoint(PhraseMappingId(3), PhraseMappingId(9));
        assert!(!noun.belongs_to(PhraseMappingId(3)));
        assert!(noun.belongs_to(PhraseMappingId(9)));
    }
}
