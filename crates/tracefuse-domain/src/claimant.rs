//! Claimant identities
//!
//! A claimant is the scoring source (heuristic, aggregation node, or
//! extraction agent) behind one probability observation. Claimants are only
//! ever compared by name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a scoring source contributing to a [`Confidence`](crate::Confidence)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Claimant(String);

impl Claimant {
    /// Create a claimant from its name (e.g. "PackageResemblance-stemming")
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The claimant's name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Claimant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Claimant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claimant_identity_is_name() {
        assert_eq!(Claimant::new("agent"), Claimant::from("agent"));
        assert_ne!(Claimant::new("agent"), Claimant::new("Agent"));
        assert_eq!(Claimant::new("agent").to_string(), "agent");
    }
}
