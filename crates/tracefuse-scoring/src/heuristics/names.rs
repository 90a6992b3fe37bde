//! Name normalization and token containment

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracefuse_domain::{split_name_parts, ModelEntity};

/// How name tokens are normalized before comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreprocessingMethod {
    /// Compare tokens verbatim
    None,
    /// Compare lowercased tokens
    Lowercase,
    /// Lowercase and strip plural suffixes
    #[default]
    Stemming,
}

impl PreprocessingMethod {
    /// Normalize a single token
    pub fn apply(&self, token: &str) -> String {
        match self {
            PreprocessingMethod::None => token.to_string(),
            PreprocessingMethod::Lowercase => token.to_lowercase(),
            PreprocessingMethod::Stemming => stem(&token.to_lowercase()),
        }
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PreprocessingMethod::None => "none",
            PreprocessingMethod::Lowercase => "lowercase",
            PreprocessingMethod::Stemming => "stemming",
        }
    }
}

impl fmt::Display for PreprocessingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreprocessingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(PreprocessingMethod::None),
            "lowercase" => Ok(PreprocessingMethod::Lowercase),
            "stemming" => Ok(PreprocessingMethod::Stemming),
            _ => Err(format!("Invalid preprocessing method: {}", s)),
        }
    }
}

fn stem(word: &str) -> String {
    if word.len() > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if word.len() > 4 && word.ends_with("sses") {
        return word[..word.len() - 2].to_string();
    }
    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Fraction of the entity's name tokens found among the candidate words
///
/// Candidate words are split into name parts as well, so package names like
/// `mediaaccess` or `media_access` both contribute tokens. Returns 0 when the
/// entity has no name tokens.
pub fn contained_ratio(entity: &ModelEntity, words: &[String], method: PreprocessingMethod) -> f64 {
    let tokens: BTreeSet<String> = entity.name_parts.iter().map(|t| method.apply(t)).collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let mut candidates: BTreeSet<String> = BTreeSet::new();
    for word in words {
        candidates.insert(method.apply(word));
        for part in split_name_parts(word) {
            candidates.insert(method.apply(&part));
        }
    }

    let contained = tokens.iter().filter(|t| candidates.contains(*t)).count();
    contained as f64 / tokens.len() as f64
}
