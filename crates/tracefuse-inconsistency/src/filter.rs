//! Detection of model elements without enough trace link support

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracefuse_domain::{link_targets, EntityId, Metamodel, ModelEntity, TraceLink};
use tracing::debug;

use crate::{InconsistencyConfig, InconsistencyError};

/// Kind of a reported inconsistency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InconsistencyKind {
    /// A model element is not (sufficiently) mentioned in the documentation
    MissingTextForModelElement,
}

impl fmt::Display for InconsistencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InconsistencyKind::MissingTextForModelElement => f.write_str("MissingTextForModelElement"),
        }
    }
}

/// One flagged model element
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Inconsistency {
    /// What is wrong
    pub kind: InconsistencyKind,
    /// Model the element belongs to
    pub metamodel: Metamodel,
    /// Flagged element
    pub entity_id: EntityId,
    /// Element name
    pub name: String,
    /// Element type tag
    pub entity_type: Option<String>,
    /// Distinct linked occurrences of the element
    pub link_count: usize,
}

impl Inconsistency {
    /// Human-readable description
    pub fn reason(&self) -> String {
        format!(
            "{} model element '{}' ({}) has {} supporting trace link(s)",
            self.metamodel,
            self.name,
            self.entity_type.as_deref().unwrap_or("untyped"),
            self.link_count
        )
    }
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.reason())
    }
}

/// Flags model elements that too few trace links point to
#[derive(Debug, Clone)]
pub struct InconsistencyFilter {
    config: InconsistencyConfig,
    whitelist: Vec<Regex>,
}

impl InconsistencyFilter {
    /// Create a filter, compiling the whitelist patterns
    pub fn new(config: InconsistencyConfig) -> Result<Self, InconsistencyError> {
        config.validate()?;

        let whitelist = config
            .whitelist_patterns
            .iter()
            .map(|pattern| {
                // Anchored: a pattern must match the whole name or name part
                Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| InconsistencyError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { config, whitelist })
    }

    /// Active configuration
    pub fn config(&self) -> &InconsistencyConfig {
        &self.config
    }

    /// Whether the entity's type, or any part of it, is in the allow-list
    pub fn is_allowed_type(&self, entity: &ModelEntity) -> bool {
        let allowed = |candidate: &str| self.config.allowed_types.iter().any(|t| t == candidate);

        entity.entity_type.as_deref().is_some_and(|t| allowed(t))
            || entity.type_parts.iter().any(|part| allowed(part.as_str()))
    }

    /// Whether any whitelist pattern matches the entity's name or a name part
    pub fn is_whitelisted(&self, entity: &ModelEntity) -> bool {
        self.whitelist.iter().any(|pattern| matches_entity(pattern, entity))
    }

    /// Report every allowed-type entity with fewer than the minimum number of
    /// linked occurrences
    ///
    /// `linked_targets` is reduced to distinct targets first, so an entity
    /// counts at most once however many links reach it. Whitelist patterns
    /// are applied one after another, each removing the remaining candidates
    /// it matches. Results keep the order of `entities`.
    pub fn find_undocumented<'a, T, E>(&self, metamodel: Metamodel, linked_targets: T, entities: E) -> Vec<Inconsistency>
    where
        T: IntoIterator<Item = &'a EntityId>,
        E: IntoIterator<Item = &'a ModelEntity>,
    {
        let distinct: BTreeSet<&EntityId> = linked_targets.into_iter().collect();

        let mut candidates: Vec<(&ModelEntity, usize)> = entities
            .into_iter()
            .filter(|entity| self.is_allowed_type(entity))
            .map(|entity| (entity, usize::from(distinct.contains(&entity.id))))
            .filter(|(_, count)| *count < self.config.minimum_links)
            .collect();

        for pattern in &self.whitelist {
            candidates.retain(|(entity, _)| !matches_entity(pattern, entity));
        }

        debug!(
            metamodel = %metamodel,
            flagged = candidates.len(),
            "Undocumented model elements detected"
        );

        candidates
            .into_iter()
            .map(|(entity, link_count)| Inconsistency {
                kind: InconsistencyKind::MissingTextForModelElement,
                metamodel,
                entity_id: entity.id.clone(),
                name: entity.name.clone(),
                entity_type: entity.entity_type.clone(),
                link_count,
            })
            .collect()
    }

    /// [`find_undocumented`](Self::find_undocumented) over the targets of accepted links
    pub fn find_undocumented_for_links<'a, E>(
        &self,
        metamodel: Metamodel,
        links: &'a [TraceLink],
        entities: E,
    ) -> Vec<Inconsistency>
    where
        E: IntoIterator<Item = &'a ModelEntity>,
    {
        self.find_undocumented(metamodel, link_targets(links), entities)
    }
}

fn matches_entity(pattern: &Regex, entity: &ModelEntity) -> bool {
    pattern.is_match(&entity.name) || entity.name_parts.iter().any(|part| pattern.is_match(part))
}
