//! Tracefuse Scoring
//!
//! Confidence-weighted heuristic scoring of architecture/code endpoint pairs.
//!
//! ```text
//! Heuristics (leaves) ─┐
//!                      ├─> Aggregation ─> ... ─> root NodeResult ─> TraceLinkDerivation
//! Heuristics (leaves) ─┘
//! ```
//!
//! Every heuristic scores the full relevant cross product, recording "no
//! evidence" where it cannot judge a pair. Aggregations fold sibling results
//! with an order-insensitive [`AggregationFunction`](tracefuse_domain::AggregationFunction),
//! so evaluation is deterministic regardless of child order.
//!
//! # Examples
//!
//! ```
//! use tracefuse_domain::{ArchitectureComponent, ArchitectureModel, CodeCompilationUnit, CodeModel};
//! use tracefuse_scoring::{ScoringConfig, ScoringContext, ScoringTree, TraceLinkDerivation};
//!
//! let architecture = ArchitectureModel::new(vec![ArchitectureComponent::new("c1", "Storage").into()]);
//! let code = CodeModel::new(vec![
//!     CodeCompilationUnit::new("u1", "Storage.java", vec!["storage".into()]).into(),
//! ]);
//!
//! let config = ScoringConfig::default();
//! let (tree, root) = ScoringTree::from_config(&config).unwrap();
//! let result = tree.evaluate(root, &ScoringContext::new(&architecture, &code)).unwrap();
//! let links = TraceLinkDerivation::new(config.link_threshold).unwrap().derive(&result);
//! assert_eq!(links.len(), 1);
//! ```

#![warn(missing_docs)]

mod aggregation;
mod config;
mod derivation;
mod error;
mod heuristic;
pub mod heuristics;
mod node_result;
mod tree;

pub use aggregation::Aggregation;
pub use config::ScoringConfig;
pub use derivation::TraceLinkDerivation;
pub use error::ScoringError;
pub use heuristic::{Heuristic, HeuristicKind, ScoringContext};
pub use node_result::NodeResult;
pub use tree::{NodeId, ScoringNode, ScoringTree};
