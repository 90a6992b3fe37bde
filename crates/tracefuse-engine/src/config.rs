//! Resolved configuration of one engine run

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracefuse_domain::AggregationFunction;
use tracefuse_inconsistency::InconsistencyConfig;
use tracefuse_scoring::ScoringConfig;
use tracefuse_text::{ConsolidationConfig, PhraseMappingAggregatorStrategy};

use crate::EngineError;

/// Separator between section and option in override keys
pub const OVERRIDE_SEPARATOR: &str = "::";

/// Configuration of every engine stage
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tracefuse_engine::EngineConfig;
///
/// let mut config = EngineConfig::default();
/// let overrides = BTreeMap::from([
///     ("Inconsistency::minimum_links".to_string(), "2".to_string()),
///     ("Scoring::aggregation_function".to_string(), "max".to_string()),
/// ]);
/// config.apply_overrides(&overrides).unwrap();
///
/// assert_eq!(config.inconsistency.minimum_links, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Heuristic scoring and link derivation
    pub scoring: ScoringConfig,

    /// Phrase and noun mapping consolidation
    pub consolidation: ConsolidationConfig,

    /// Undocumented element detection
    pub inconsistency: InconsistencyConfig,
}

impl EngineConfig {
    /// Strict preset for every stage
    pub fn strict() -> Self {
        Self {
            scoring: ScoringConfig::strict(),
            consolidation: ConsolidationConfig::strict(),
            inconsistency: InconsistencyConfig::strict(),
        }
    }

    /// Lenient preset for every stage
    pub fn lenient() -> Self {
        Self {
            scoring: ScoringConfig::lenient(),
            consolidation: ConsolidationConfig::lenient(),
            inconsistency: InconsistencyConfig::lenient(),
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), EngineError> {
        self.scoring.validate()?;
        self.consolidation.validate()?;
        self.inconsistency.validate()?;
        Ok(())
    }

    /// Apply `Section::option = value` overrides on top of this configuration
    ///
    /// Recognized keys:
    ///
    /// | key | value |
    /// |-----|-------|
    /// | `Scoring::aggregation_function` | `average`, `max`, `min`, `median` |
    /// | `Scoring::link_threshold` | float in [0, 1] |
    /// | `Consolidation::min_cosine_similarity` | float in [0, 1] |
    /// | `Consolidation::aggregator` | `max_similarity`, `average_similarity`, `min_similarity` |
    /// | `Consolidation::noun_similarity_threshold` | float in [0, 1] |
    /// | `Inconsistency::minimum_links` | non-negative integer |
    /// | `Inconsistency::allowed_types` | comma-separated type tags |
    /// | `Inconsistency::whitelist_patterns` | comma-separated regular expressions |
    ///
    /// Section names are matched case-insensitively. Unknown keys, unparsable
    /// values and a result that fails validation are errors; on error the
    /// configuration is left unchanged.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Result<(), EngineError> {
        let mut updated = self.clone();
        for (key, value) in overrides {
            updated.apply_override(key, value)?;
        }
        updated.validate()?;

        *self = updated;
        Ok(())
    }

    fn apply_override(&mut self, key: &str, value: &str) -> Result<(), EngineError> {
        let (section, option) = key
            .split_once(OVERRIDE_SEPARATOR)
            .ok_or_else(|| EngineError::Config(format!("Override key '{}' is not of the form Section::option", key)))?;

        match (section.trim().to_lowercase().as_str(), option.trim()) {
            ("scoring", "aggregation_function") => {
                self.scoring.aggregation_function = parse::<AggregationFunction>(key, value)?;
            }
            ("scoring", "link_threshold") => self.scoring.link_threshold = parse(key, value)?,
            ("consolidation", "min_cosine_similarity") => {
                self.consolidation.min_cosine_similarity = parse(key, value)?;
            }
            ("consolidation", "aggregator") => {
                self.consolidation.aggregator = parse::<PhraseMappingAggregatorStrategy>(key, value)?;
            }
            ("consolidation", "noun_similarity_threshold") => {
                self.consolidation.noun_similarity_threshold = parse(key, value)?;
            }
            ("inconsistency", "minimum_links") => self.inconsistency.minimum_links = parse(key, value)?,
            ("inconsistency", "allowed_types") => self.inconsistency.allowed_types = split_list(value),
            ("inconsistency", "whitelist_patterns") => self.inconsistency.whitelist_patterns = split_list(value),
            _ => return Err(EngineError::Config(format!("Unknown configuration option '{}'", key))),
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, EngineError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| EngineError::Config(format!("Invalid value '{}' for '{}': {}", value, key, e)))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
