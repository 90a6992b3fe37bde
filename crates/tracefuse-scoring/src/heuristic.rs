//! Leaf scorers of the scoring tree

use serde::{Deserialize, Serialize};
use tracefuse_domain::{
    ArchitectureComponent, ArchitectureInterface, ArchitectureItem, ArchitectureModel, Claimant,
    CodeCompilationUnit, CodeModel, Confidence, DomainError, EndpointPair,
};
use tracing::{debug, warn};

use crate::heuristics::{NameResemblance, PackageResemblance};
use crate::{NodeResult, ScoringError};

/// The two endpoint collections a scoring run works on
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Architecture side (sources)
    pub architecture: &'a ArchitectureModel,
    /// Code side (targets)
    pub code: &'a CodeModel,
}

impl<'a> ScoringContext<'a> {
    /// Create a context
    pub fn new(architecture: &'a ArchitectureModel, code: &'a CodeModel) -> Self {
        Self { architecture, code }
    }

    /// Cross product of architecture items and compilation units
    pub fn architecture_to_compilation_units(
        &self,
    ) -> impl Iterator<Item = (&'a ArchitectureItem, &'a CodeCompilationUnit)> + 'a {
        let architecture = self.architecture;
        let code = self.code;
        architecture
            .items
            .iter()
            .flat_map(move |item| code.compilation_units().map(move |unit| (item, unit)))
    }
}

/// A leaf scorer
///
/// Implementors override the per-endpoint-kind hooks they can judge; the
/// default [`score`](Heuristic::score) walks the relevant cross product and
/// records one confidence per pair, "no evidence" included.
pub trait Heuristic {
    /// Identity under which this heuristic reports observations
    fn claimant(&self) -> Claimant;

    /// Whether a pair belongs to this heuristic's cross product
    fn is_relevant(&self, _item: &ArchitectureItem, _unit: &CodeCompilationUnit) -> bool {
        true
    }

    /// Score a component against a compilation unit
    fn component_confidence(
        &self,
        _component: &ArchitectureComponent,
        _unit: &CodeCompilationUnit,
    ) -> Result<Confidence, DomainError> {
        Ok(Confidence::no_evidence())
    }

    /// Score an interface against a compilation unit
    fn interface_confidence(
        &self,
        _interface: &ArchitectureInterface,
        _unit: &CodeCompilationUnit,
    ) -> Result<Confidence, DomainError> {
        Ok(Confidence::no_evidence())
    }

    /// Score every relevant pair
    fn score(&self, ctx: &ScoringContext<'_>) -> Result<NodeResult, ScoringError> {
        let claimant = self.claimant();
        let mut result = NodeResult::new();

        for (item, unit) in ctx.architecture_to_compilation_units() {
            if !self.is_relevant(item, unit) {
                continue;
            }

            let pair = EndpointPair::new(item.id().clone(), unit.entity.id.clone());
            let confidence = if !item.entity().is_well_formed() || !unit.entity.is_well_formed() {
                warn!(
                    heuristic = %claimant,
                    source = %pair.source,
                    target = %pair.target,
                    "Malformed endpoint, scoring as no evidence"
                );
                Confidence::no_evidence()
            } else {
                match item {
                    ArchitectureItem::Component(component) => self.component_confidence(component, unit)?,
                    ArchitectureItem::Interface(interface) => self.interface_confidence(interface, unit)?,
                }
            };

            result.add(pair, confidence)?;
        }

        debug!(heuristic = %claimant, pairs = result.len(), "Heuristic scored");
        Ok(result)
    }
}

/// Configured heuristic, compared and hashed by its configuration
///
/// Two nodes with equal `HeuristicKind` values are interchangeable, which is
/// what lets a [`ScoringTree`](crate::ScoringTree) share one leaf between
/// several aggregations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeuristicKind {
    /// Architecture name vs. enclosing package names
    PackageResemblance(PackageResemblance),
    /// Architecture name vs. compilation unit name
    NameResemblance(NameResemblance),
}

impl Heuristic for HeuristicKind {
    fn claimant(&self) -> Claimant {
        match self {
            HeuristicKind::PackageResemblance(h) => h.claimant(),
            HeuristicKind::NameResemblance(h) => h.claimant(),
        }
    }

    fn score(&self, ctx: &ScoringContext<'_>) -> Result<NodeResult, ScoringError> {
        match self {
            HeuristicKind::PackageResemblance(h) => h.score(ctx),
            HeuristicKind::NameResemblance(h) => h.score(ctx),
        }
    }
}

impl From<PackageResemblance> for HeuristicKind {
    fn from(h: PackageResemblance) -> Self {
        HeuristicKind::PackageResemblance(h)
    }
}

impl From<NameResemblance> for HeuristicKind {
    fn from(h: NameResemblance) -> Self {
        HeuristicKind::NameResemblance(h)
    }
}
