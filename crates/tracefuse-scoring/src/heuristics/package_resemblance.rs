//! Package resemblance heuristic

use serde::{Deserialize, Serialize};
use tracefuse_domain::{
    ArchitectureComponent, ArchitectureInterface, Claimant, CodeCompilationUnit, Confidence,
    DomainError, ModelEntity,
};

use super::{contained_ratio, PreprocessingMethod};
use crate::Heuristic;

/// Scores how much of an architecture element's name appears in the
/// enclosing package chain of a compilation unit
///
/// Units in the default package and zero similarity both yield "no evidence".
/// Interfaces that declare method signatures are left to other heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PackageResemblance {
    /// Token normalization
    #[serde(default)]
    pub preprocessing: PreprocessingMethod,
}

impl PackageResemblance {
    /// Create the heuristic
    pub fn new(preprocessing: PreprocessingMethod) -> Self {
        Self { preprocessing }
    }

    fn resemblance(&self, entity: &ModelEntity, unit: &CodeCompilationUnit) -> Result<Confidence, DomainError> {
        if !unit.has_parent() {
            return Ok(Confidence::no_evidence());
        }

        let similarity = contained_ratio(entity, &unit.parent_package_names, self.preprocessing);
        if similarity == 0.0 {
            return Ok(Confidence::no_evidence());
        }
        Confidence::with_observation(self.claimant(), similarity)
    }
}

impl Heuristic for PackageResemblance {
    fn claimant(&self) -> Claimant {
        Claimant::new(format!("PackageResemblance-{}", self.preprocessing))
    }

    fn component_confidence(
        &self,
        component: &ArchitectureComponent,
        unit: &CodeCompilationUnit,
    ) -> Result<Confidence, DomainError> {
        self.resemblance(&component.entity, unit)
    }

    fn interface_confidence(
        &self,
        interface: &ArchitectureInterface,
        unit: &CodeCompilationUnit,
    ) -> Result<Confidence, DomainError> {
        if !interface.method_signatures.is_empty() {
            return Ok(Confidence::no_evidence());
        }
        self.resemblance(&interface.entity, unit)
    }
}
