//! Selection of accepted trace links from a root result

use std::collections::BTreeSet;

use tracefuse_domain::TraceLink;
use tracing::info;

use crate::{NodeResult, ScoringError};

/// Accepts every pair whose aggregated confidence is strictly above a threshold
///
/// No one-to-one reduction happens here: one architecture element may link
/// to several compilation units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceLinkDerivation {
    threshold: f64,
}

impl TraceLinkDerivation {
    /// Create a derivation; the threshold must lie in [0, 1]
    pub fn new(threshold: f64) -> Result<Self, ScoringError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ScoringError::Config(format!(
                "link threshold {} is outside [0.0, 1.0]",
                threshold
            )));
        }
        Ok(Self { threshold })
    }

    /// The decision threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Derive the accepted links, ordered by endpoint pair
    pub fn derive(&self, result: &NodeResult) -> BTreeSet<TraceLink> {
        let links: BTreeSet<TraceLink> = result
            .iter()
            .filter(|(_, confidence)| confidence.value() > self.threshold)
            .map(|(pair, confidence)| TraceLink::new(pair.clone(), confidence.clone()))
            .collect();

        info!(
            candidates = result.len(),
            accepted = links.len(),
            threshold = self.threshold,
            "Derived trace links"
        );
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracefuse_domain::{Claimant, Confidence, EndpointPair};

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
    fn test_boundary_is_excluded() {
        let derivation = TraceLinkDerivation::new(0.5).unwrap();
        let links = derivation.derive(&result(&[("c1", "u1", 0.5), ("c1", "u2", 0.50001)]));

        assert_eq!(links.len(), 1);
        assert_eq!(links.iter().next().unwrap().target().as_str(), "u2");
    }

    #[test]
    fn test_multiplicity_is_kept() {
        let derivation = TraceLinkDerivation::new(0.3).unwrap();
        let links = derivation.derive(&result(&[("c1", "u1", 0.9), ("c1", "u2", 0.8), ("c2", "u1", 0.1)]));

        let pairs: Vec<_> = links.iter().map(|l| (l.source().as_str(), l.target().as_str())).collect();
        assert_eq!(pairs, vec![("c1", "u1"), ("c1", "u2")]);
        assert!((links.iter().next().unwrap().score() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_threshold() {
        assert!(TraceLinkDerivation::new(1.1).is_err());
        assert!(TraceLinkDerivation::new(f64::NAN).is_err());
        assert!(TraceLinkDerivation::new(0.0).is_ok());
    }
}
