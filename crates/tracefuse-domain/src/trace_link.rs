//! Endpoint pairs and trace links

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{Confidence, EntityId};

/// Ordered (source, target) pair of endpoints
///
/// Ordering is lexicographic on source then target, so collections keyed by
/// pairs iterate identically regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EndpointPair {
    /// Source endpoint (e.g. architecture item)
    pub source: EntityId,
    /// Target endpoint (e.g. compilation unit)
    pub target: EntityId,
}

impl EndpointPair {
    /// Create a pair
    pub fn new(source: impl Into<EntityId>, target: impl Into<EntityId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Accepted association between two endpoints
///
/// Identity is the endpoint pair alone: two links between the same endpoints
/// are the same link whatever their confidence.
#[derive(Debug, Clone)]
pub struct TraceLink {
    pair: EndpointPair,
    confidence: Confidence,
}

impl TraceLink {
    /// Create a link
    pub fn new(pair: EndpointPair, confidence: Confidence) -> Self {
        Self { pair, confidence }
    }

    /// The endpoint pair
    pub fn pair(&self) -> &EndpointPair {
        &self.pair
    }

    /// Source endpoint id
    pub fn source(&self) -> &EntityId {
        &self.pair.source
    }

    /// Target endpoint id
    pub fn target(&self) -> &EntityId {
        &self.pair.target
    }

    /// The fused confidence behind this link
    pub fn confidence(&self) -> &Confidence {
        &self.confidence
    }

    /// Numeric confidence
    pub fn score(&self) -> f64 {
        self.confidence.value()
    }
}

impl PartialEq for TraceLink {
    fn eq(&self, other: &Self) -> bool {
        self.pair == other.pair
    }
}

impl Eq for TraceLink {}

impl Hash for TraceLink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pair.hash(state);
    }
}

impl PartialOrd for TraceLink {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TraceLink {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pair.cmp(&other.pair)
    }
}

/// Project links onto their distinct target endpoints
pub fn link_targets<'a>(links: impl IntoIterator<Item = &'a TraceLink>) -> BTreeSet<&'a EntityId> {
    links.into_iter().map(TraceLink::target).collect()
}
