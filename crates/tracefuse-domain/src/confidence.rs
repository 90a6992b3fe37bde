//! Multi-source confidence fusion
//!
//! A [`Confidence`] records at most one probability observation per
//! [`Claimant`] and fuses them with its [`AggregationFunction`]. A confidence
//! without observations is the "no evidence" value: it aggregates to 0 like an
//! explicit 0.0 observation, but the two do not compare equal.

use crate::{AggregationFunction, Claimant, DomainError};

/// Fused probability estimate from several independent sources
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Confidence {
    function: AggregationFunction,
    observations: Vec<(Claimant, f64)>,
}

impl Confidence {
    /// Create a "no evidence" confidence using the given aggregation function
    pub fn new(function: AggregationFunction) -> Self {
        Self {
            function,
            observations: Vec::new(),
        }
    }

    /// "No evidence" under the default (average) aggregation
    pub fn no_evidence() -> Self {
        Self::default()
    }

    /// Average-aggregated confidence holding a single observation
    ///
    /// # Examples
    ///
    /// ```
    /// use tracefuse_domain::{Claimant, Confidence};
    ///
    /// let confidence = Confidence::with_observation(Claimant::new("agent"), 0.75).unwrap();
    /// assert_eq!(confidence.value(), 0.75);
    /// assert!(Confidence::with_observation(Claimant::new("agent"), 1.5).is_err());
    /// ```
    pub fn with_observation(claimant: Claimant, probability: f64) -> Result<Self, DomainError> {
        let mut confidence = Self::no_evidence();
        confidence.add_observation(claimant, probability)?;
        Ok(confidence)
    }

    /// Record an observation, replacing an earlier one from the same claimant
    pub fn add_observation(&mut self, claimant: Claimant, probability: f64) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(DomainError::InvalidArgument(format!(
                "probability {} from '{}' is outside [0.0, 1.0]",
                probability, claimant
            )));
        }

        match self.observations.iter_mut().find(|(c, _)| *c == claimant) {
            Some(existing) => existing.1 = probability,
            None => self.observations.push((claimant, probability)),
        }
        Ok(())
    }

    /// Aggregated value; 0 when there is no evidence
    pub fn value(&self) -> f64 {
        let values: Vec<f64> = self.observations.iter().map(|(_, p)| *p).collect();
        self.function.apply(&values)
    }

    /// Union another confidence into this one
    ///
    /// Observations from claimants already present here are kept as they are.
    /// Both sides must use the same aggregation function.
    pub fn merge(&mut self, other: &Confidence) -> Result<(), DomainError> {
        if self.function != other.function {
            return Err(DomainError::ConfigurationMismatch {
                expected: self.function,
                found: other.function,
            });
        }

        for (claimant, probability) in &other.observations {
            if !self.observations.iter().any(|(c, _)| c == claimant) {
                self.observations.push((claimant.clone(), *probability));
            }
        }
        Ok(())
    }

    /// The aggregation function
    pub fn function(&self) -> AggregationFunction {
        self.function
    }

    /// Observations in insertion order
    pub fn observations(&self) -> &[(Claimant, f64)] {
        &self.observations
    }

    /// Observation recorded for a claimant, if any
    pub fn observation(&self, claimant: &Claimant) -> Option<f64> {
        self.observations
            .iter()
            .find(|(c, _)| c == claimant)
            .map(|(_, p)| *p)
    }

    /// True when no claimant has reported anything
    pub fn is_no_evidence(&self) -> bool {
        self.observations.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn observations() -> impl Strategy<Value = Vec<(u8, f64)>> {
        prop::collection::vec((0u8..6, 0.0f64..=1.0), 0..16)
    }

    fn build(function: AggregationFunction, obs: &[(u8, f64)], prefix: &str) -> Confidence {
        let mut confidence = Confidence::new(function);
        for (id, p) in obs {
            confidence
                .add_observation(Claimant::new(format!("{}{}", prefix, id)), *p)
                .unwrap();
        }
        confidence
    }

    proptest! {
        /// Property: average equals the mean of the latest observation per claimant
        #[test]
        fn test_average_is_mean_of_latest(obs in observations()) {
            let confidence = build(AggregationFunction::Average, &obs, "c");

            let mut latest = std::collections::BTreeMap::new();
            for (id, p) in &obs {
                latest.insert(*id, *p);
            }
            let expected = if latest.is_empty() {
                0.0
            } else {
                latest.values().sum::<f64>() / latest.len() as f64
            };

            prop_assert!((confidence.value() - expected).abs() < 1e-9);
        }

        /// Property: the value does not depend on insertion order across claimants
        #[test]
        fn test_insertion_order_independent(obs in observations()) {
            let mut latest = std::collections::BTreeMap::new();
            for (id, p) in &obs {
                latest.insert(*id, *p);
            }
            let forward: Vec<(u8, f64)> = latest.iter().map(|(k, v)| (*k, *v)).collect();
            let backward: Vec<(u8, f64)> = forward.iter().rev().copied().collect();

            for function in AggregationFunction::ALL {
                let a = build(function, &forward, "c");
                let b = build(function, &backward, "c");
                prop_assert!((a.value() - b.value()).abs() < 1e-9);
            }
        }

        /// Property: merge of disjoint claimant sets is commutative
        #[test]
        fn test_merge_commutative(left in observations(), right in observations()) {
            for function in AggregationFunction::ALL {
                let a = build(function, &left, "l");
                let b = build(function, &right, "r");

                let mut ab = a.clone();
                ab.merge(&b).unwrap();
                let mut ba = b.clone();
                ba.merge(&a).unwrap();

                prop_assert!((ab.value() - ba.value()).abs() < 1e-9);
                prop_assert_eq!(ab.observations().len(), ba.observations().len());
            }
        }

        /// Property: merge is associative across three instances
        #[test]
        fn test_merge_associative(
            x in observations(),
            y in observations(),
            z in observations(),
        ) {
            let a = build(AggregationFunction::Average, &x, "x");
            let b = build(AggregationFunction::Average, &y, "y");
            let c = build(AggregationFunction::Average, &z, "z");

            let mut left = a.clone();
            left.merge(&b).unwrap();
            left.merge(&c).unwrap();

            let mut bc = b.clone();
            bc.merge(&c).unwrap();
            let mut right = a.clone();
            right.merge(&bc).unwrap();

            prop_assert_eq!(left, right);
        }
    }
}
