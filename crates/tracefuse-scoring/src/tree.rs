//! Scoring trees: heuristic leaves folded bottom-up by aggregations

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::{Aggregation, Heuristic, HeuristicKind, NodeResult, ScoringConfig, ScoringContext, ScoringError};

/// Index of a node inside a [`ScoringTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position in insertion order
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the scoring tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScoringNode {
    /// Leaf
    Heuristic(HeuristicKind),
    /// Inner node over previously added children
    Aggregation {
        /// Combining function
        aggregation: Aggregation,
        /// Child nodes, in wiring order
        children: Vec<NodeId>,
    },
}

/// Arena of scoring nodes
///
/// Children must exist before the node that consumes them, so insertion order
/// is always a valid topological order. Structurally equal nodes are stored
/// once: adding the same configured heuristic twice returns the same id, and
/// its result is computed once per evaluation.
#[derive(Debug, Clone, Default)]
pub struct ScoringTree {
    nodes: Vec<ScoringNode>,
    index: HashMap<ScoringNode, NodeId>,
}

impl ScoringTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tree described by a configuration; returns it with its root
    pub fn from_config(config: &ScoringConfig) -> Result<(Self, NodeId), ScoringError> {
        if config.heuristics.is_empty() {
            return Err(ScoringError::Config("at least one heuristic is required".to_string()));
        }

        let mut tree = Self::new();
        let leaves: Vec<NodeId> = config.heuristics.iter().map(|h| tree.add_heuristic(*h)).collect();
        let root = tree.add_aggregation(Aggregation::new(config.aggregation_function), leaves)?;
        Ok((tree, root))
    }

    /// Add a leaf
    pub fn add_heuristic(&mut self, heuristic: impl Into<HeuristicKind>) -> NodeId {
        self.insert(ScoringNode::Heuristic(heuristic.into()))
    }

    /// Add an aggregation over existing nodes
    pub fn add_aggregation(&mut self, aggregation: Aggregation, children: Vec<NodeId>) -> Result<NodeId, ScoringError> {
        if children.is_empty() {
            return Err(ScoringError::EmptyAggregation);
        }
        if let Some(unknown) = children.iter().find(|c| c.0 >= self.nodes.len()) {
            return Err(ScoringError::UnknownNode(*unknown));
        }
        Ok(self.insert(ScoringNode::Aggregation { aggregation, children }))
    }

    fn insert(&mut self, node: ScoringNode) -> NodeId {
        if let Some(id) = self.index.get(&node) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(node.clone());
        self.index.insert(node, id);
        id
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&ScoringNode> {
        self.nodes.get(id.0)
    }

    /// Number of distinct nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when no node was added
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Evaluate the subtree below `root`
    ///
    /// Nodes run in insertion order, each exactly once, and only when `root`
    /// depends on them.
    pub fn evaluate(&self, root: NodeId, ctx: &ScoringContext<'_>) -> Result<NodeResult, ScoringError> {
        if root.0 >= self.nodes.len() {
            return Err(ScoringError::UnknownNode(root));
        }

        let mut needed = vec![false; root.0 + 1];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if needed[id.0] {
                continue;
            }
            needed[id.0] = true;
            if let ScoringNode::Aggregation { children, .. } = &self.nodes[id.0] {
                stack.extend(children.iter().copied());
            }
        }

        let mut results: Vec<Option<NodeResult>> = vec![None; root.0 + 1];
        for (position, node) in self.nodes.iter().enumerate().take(root.0 + 1) {
            if !needed[position] {
                continue;
            }

            let result = match node {
                ScoringNode::Heuristic(heuristic) => heuristic.score(ctx)?,
                ScoringNode::Aggregation { aggregation, children } => {
                    let child_results = children
                        .iter()
                        .map(|c| results[c.0].as_ref().ok_or(ScoringError::UnknownNode(*c)))
                        .collect::<Result<Vec<&NodeResult>, ScoringError>>()?;
                    aggregation.combine(ctx, &child_results)?
                }
            };
            debug!(node = position, pairs = result.len(), "Scoring node evaluated");
            results[position] = Some(result);
        }

        results[root.0].take().ok_or(ScoringError::UnknownNode(root))
    }
}
