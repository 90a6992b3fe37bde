//! Configuration for undocumented-element detection

use serde::{Deserialize, Serialize};

use crate::InconsistencyError;

/// Configuration for [`InconsistencyFilter`](crate::InconsistencyFilter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InconsistencyConfig {
    /// Entities with fewer links than this are reported
    pub minimum_links: usize,

    /// Type tags eligible for reporting, matched against the full type or any type part
    pub allowed_types: Vec<String>,

    /// Regular expressions; an entity whose name or any name part fully
    /// matches one of them is never reported
    pub whitelist_patterns: Vec<String>,
}

impl Default for InconsistencyConfig {
    fn default() -> Self {
        Self {
            minimum_links: 1,
            allowed_types: default_allowed_types(),
            whitelist_patterns: Vec::new(),
        }
    }
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "Component".to_string(),
        "BasicComponent".to_string(),
        "CompositeComponent".to_string(),
    ]
}

impl InconsistencyConfig {
    /// Strict preset: interfaces count too and every element needs two links
    pub fn strict() -> Self {
        let mut allowed_types = default_allowed_types();
        allowed_types.push("Interface".to_string());
        Self {
            minimum_links: 2,
            allowed_types,
            whitelist_patterns: Vec::new(),
        }
    }

    /// Lenient preset: only plain components are checked
    pub fn lenient() -> Self {
        Self {
            minimum_links: 1,
            allowed_types: vec!["Component".to_string()],
            whitelist_patterns: Vec::new(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), InconsistencyError> {
        if self.allowed_types.iter().any(|t| t.trim().is_empty()) {
            return Err(InconsistencyError::Config("allowed_types must not contain blank entries".to_string()));
        }
        for pattern in &self.whitelist_patterns {
            regex::Regex::new(pattern).map_err(|e| InconsistencyError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, InconsistencyError> {
        toml::from_str(toml_str).map_err(|e| InconsistencyError::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, InconsistencyError> {
        toml::to_string_pretty(self)
            .map_err(|e| InconsistencyError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
