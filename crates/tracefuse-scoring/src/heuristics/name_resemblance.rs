//! Name resemblance heuristic

use serde::{Deserialize, Serialize};
use tracefuse_domain::{
    ArchitectureComponent, ArchitectureInterface, Claimant, CodeCompilationUnit, Confidence,
    DomainError, ModelEntity,
};

use super::{contained_ratio, PreprocessingMethod};
use crate::Heuristic;

/// Scores how much of an architecture element's name appears in the
/// compilation unit's own name (file extension ignored)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NameResemblance {
    /// Token normalization
    #[serde(default)]
    pub preprocessing: PreprocessingMethod,
}

impl NameResemblance {
    /// Create the heuristic
    pub fn new(preprocessing: PreprocessingMethod) -> Self {
        Self { preprocessing }
    }

    fn resemblance(&self, entity: &ModelEntity, unit: &CodeCompilationUnit) -> Result<Confidence, DomainError> {
        let name = unit.entity.name.as_str();
        let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);

        let similarity = contained_ratio(entity, &[stem.to_string()], self.preprocessing);
        if similarity == 0.0 {
            return Ok(Confidence::no_evidence());
        }
        Confidence::with_observation(self.claimant(), similarity)
    }
}

impl Heuristic for NameResemblance {
    fn claimant(&self) -> Claimant {
        Claimant::new(format!("NameResemblance-{}", self.preprocessing))
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
        self.resemblance(&interface.entity, unit)
    }
}
