//! Inner nodes of the scoring tree

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracefuse_domain::{AggregationFunction, Claimant, Confidence, DomainError, EndpointPair};
use tracing::debug;

use crate::{NodeResult, ScoringContext, ScoringError};

/// Combines the results of several child nodes
///
/// For every pair scored by at least one child, the aggregation applies its
/// own function to the children's aggregated values. A child that did not
/// score the pair contributes 0, exactly as if it had reported "no
/// evidence". Equality and hashing follow the configured function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Aggregation {
    /// Function applied across child values
    pub function: AggregationFunction,
}

impl Aggregation {
    /// Create an aggregation
    pub fn new(function: AggregationFunction) -> Self {
        Self { function }
    }

    /// Identity of this node as an observation source
    pub fn claimant(&self) -> Claimant {
        Claimant::new(format!("Aggregation-{}", self.function))
    }

    /// Combine child results into one
    pub fn combine(&self, ctx: &ScoringContext<'_>, children: &[&NodeResult]) -> Result<NodeResult, ScoringError> {
        let pairs: BTreeSet<&EndpointPair> = children.iter().flat_map(|child| child.pairs()).collect();
        let prefix = self.claimant();
        let mut result = NodeResult::new();

        for pair in pairs {
            let mut confidence = Confidence::new(self.function);
            for (index, child) in children.iter().enumerate() {
                confidence.add_observation(Claimant::new(format!("{}#{}", prefix, index)), child.value_of(pair))?;
            }
            result.add(pair.clone(), confidence)?;
        }

        debug!(
            aggregation = %prefix,
            children = children.len(),
            architecture_items = ctx.architecture.items.len(),
            pairs = result.len(),
            "Aggregation combined"
        );
        Ok(result)
    }

    /// Merge two aggregation nodes; only identical functions are compatible
    pub fn merge(&self, other: &Aggregation) -> Result<Aggregation, ScoringError> {
        if self.function != other.function {
            return Err(DomainError::ConfigurationMismatch {
                expected: self.function,
                found: other.function,
            }
            .into());
        }
        Ok(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracefuse_domain::{ArchitectureModel, CodeModel};

    fn result(entries: &[(&str, &str, f64)]) -> NodeResult {
        let mut r = NodeResult::new();
        for (source, target, p) in entries {
            r.add(
                EndpointPair::new(*source, *target),
                Confidence::with_observation(Claimant::new("h"), *p).unwrap(),
            )
            .unwrap();
        }
        r
    }

    #[test]
    fn test_average_over_children() {
        let architecture = ArchitectureModel::default();
        let code = CodeModel::default();
        let ctx = ScoringContext::new(&architecture, &code);

        let a = result(&[("c1", "u1", 0.8)]);
        let b = result(&[("c1", "u1", 0.4)]);

        let combined = Aggregation::new(AggregationFunction::Average)
            .combine(&ctx, &[&a, &b])
            .unwrap();

        assert!((combined.value_of(&EndpointPair::new("c1", "u1")) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_missing_pair_counts_as_no_evidence() {
        let architecture = ArchitectureModel::default();
        let code = CodeModel::default();
        let ctx = ScoringContext::new(&architecture, &code);

        let a = result(&[("c1", "u1", 0.9), ("c2", "u1", 0.3)]);
        let b = result(&[("c1", "u1", 0.3)]);
        let mut explicit = b.clone();
        explicit.add(EndpointPair::new("c2", "u1"), Confidence::no_evidence()).unwrap();

        for function in AggregationFunction::ALL {
            let aggregation = Aggregation::new(function);
            let implicit = aggregation.combine(&ctx, &[&a, &b]).unwrap();
            let explicit = aggregation.combine(&ctx, &[&a, &explicit]).unwrap();

            let pair = EndpointPair::new("c2", "u1");
            assert_eq!(implicit.value_of(&pair), explicit.value_of(&pair));
        }

        let min = Aggregation::new(AggregationFunction::Min).combine(&ctx, &[&a, &b]).unwrap();
        assert_eq!(min.value_of(&EndpointPair::new("c2", "u1")), 0.0);
    }

    #[test]
    fn test_no_children_yields_empty_result() {
        let architecture = ArchitectureModel::default();
        let code = CodeModel::default();
        let ctx = ScoringContext::new(&architecture, &code);

        let combined = Aggregation::default().combine(&ctx, &[]).unwrap();
        assert!(combined.is_empty());
    }

    #[test]
    fn test_merge_mismatch() {
        let avg = Aggregation::new(AggregationFunction::Average);
        let max = Aggregation::new(AggregationFunction::Max);

        assert_eq!(avg.merge(&avg), Ok(avg));
        assert!(matches!(
            avg.merge(&max),
            Err(ScoringError::Domain(DomainError::ConfigurationMismatch { .. }))
        ));
    }
}
