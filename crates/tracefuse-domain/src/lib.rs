//! Tracefuse Domain Layer
//!
//! Value objects shared by every stage of trace link recovery between
//! documentation, architecture models and code.
//!
//! ## Key Concepts
//!
//! - **Claimant**: identity of a scoring source
//! - **Confidence**: per-claimant probability observations fused by an
//!   [`AggregationFunction`]
//! - **Entities**: architecture items and code items, already extracted
//! - **EndpointPair / TraceLink**: candidate and accepted associations
//!
//! This crate holds no scoring logic and performs no I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregation_function;
pub mod claimant;
pub mod confidence;
pub mod entity;
pub mod error;
pub mod name;
pub mod trace_link;

// Re-exports for convenience
pub use aggregation_function::AggregationFunction;
pub use claimant::Claimant;
pub use confidence::Confidence;
pub use entity::{
    ArchitectureComponent, ArchitectureInterface, ArchitectureItem, ArchitectureModel,
    CodeCompilationUnit, CodeItem, CodeModel, CodePackage, EntityId, Metamodel, ModelEntity,
};
pub use error::DomainError;
pub use name::split_name_parts;
pub use trace_link::{link_targets, EndpointPair, TraceLink};
