//! Configuration for the scoring stage

use serde::{Deserialize, Serialize};
use tracefuse_domain::AggregationFunction;

use crate::heuristics::{NameResemblance, PackageResemblance, PreprocessingMethod};
use crate::{HeuristicKind, ScoringError};

/// Configuration for scoring and link derivation
///
/// # Examples
///
/// ```
/// use tracefuse_scoring::ScoringConfig;
///
/// let config = ScoringConfig::default();
/// assert_eq!(config.link_threshold, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Function used by the root aggregation
    pub aggregation_function: AggregationFunction,

    /// Pairs scoring strictly above this value become trace links
    pub link_threshold: f64,

    /// Leaf heuristics under the root aggregation
    pub heuristics: Vec<HeuristicKind>,
}

fn default_heuristics() -> Vec<HeuristicKind> {
    vec![
        PackageResemblance::new(PreprocessingMethod::Stemming).into(),
        NameResemblance::new(PreprocessingMethod::Stemming).into(),
    ]
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            aggregation_function: AggregationFunction::Average,
            link_threshold: 0.5,
            heuristics: default_heuristics(),
        }
    }
}

impl ScoringConfig {
    /// Strict preset: weakest heuristic decides, high threshold
    pub fn strict() -> Self {
        Self {
            aggregation_function: AggregationFunction::Min,
            link_threshold: 0.75,
            heuristics: default_heuristics(),
        }
    }

    /// Lenient preset: strongest heuristic decides, low threshold
    pub fn lenient() -> Self {
        Self {
            aggregation_function: AggregationFunction::Max,
            link_threshold: 0.3,
            heuristics: default_heuristics(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ScoringError> {
        if !(0.0..=1.0).contains(&self.link_threshold) {
            return Err(ScoringError::Config(format!(
                "link_threshold {} must be within [0.0, 1.0]",
                self.link_threshold
            )));
        }
        if self.heuristics.is_empty() {
            return Err(ScoringError::Config("heuristics must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ScoringError> {
        toml::from_str(toml_str).map_err(|e| ScoringError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ScoringError> {
        toml::to_string_pretty(self).map_err(|e| ScoringError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
        assert!(ScoringConfig::strict().validate().is_ok());
        assert!(ScoringConfig::lenient().validate().is_ok());
        assert!(ScoringConfig::strict().link_threshold > ScoringConfig::lenient().link_threshold);
    }

    #[test]
    fn test_invalid_threshold() {
        let mut config = ScoringConfig::default();
        config.link_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ScoringConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = ScoringConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_toml_defaults() {
        let parsed = ScoringConfig::from_toml("link_threshold = 0.6").unwrap();
        assert_eq!(parsed.aggregation_function, AggregationFunction::Average);
        assert_eq!(parsed.heuristics, default_heuristics());
        assert_eq!(parsed.link_threshold, 0.6);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ScoringConfig::from_toml(r#"aggregation_function = "max""#).unwrap();
        assert_eq!(parsed.aggregation_function, AggregationFunction::Max);
        assert_eq!(parsed.link_threshold, 0.5);
        assert_eq!(parsed.heuristics, default_heuristics());

        assert_eq!(ScoringConfig::from_toml("").unwrap(), ScoringConfig::default());
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let config = ScoringConfig::strict();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: ScoringConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }
}
