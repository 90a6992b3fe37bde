//! Tracefuse Engine
//!
//! Library entry point that wires the stages of trace link recovery together:
//!
//! 1. consolidate the phrase and noun mappings extracted from documentation
//! 2. score every architecture item against every compilation unit with the
//!    configured scoring tree
//! 3. accept the pairs scoring strictly above the link threshold
//! 4. report model elements without enough supporting links
//!
//! Parsing text, models and code happens elsewhere; the engine receives
//! already built entities and mappings and returns in-memory results.
//!
//! ```
//! use tracefuse_domain::{ArchitectureComponent, ArchitectureModel, CodeCompilationUnit, CodeModel, Metamodel};
//! use tracefuse_engine::{Engine, EngineConfig, EngineInput};
//!
//! let input = EngineInput {
//!     architecture: ArchitectureModel::new(vec![ArchitectureComponent::new("c1", "Storage").into()]),
//!     code: CodeModel::new(vec![
//!         CodeCompilationUnit::new("u1", "Storage.java", vec!["storage".to_string()]).into(),
//!     ]),
//!     ..Default::default()
//! };
//!
//! let engine = Engine::new(EngineConfig::default()).unwrap();
//! let output = engine.run(input).unwrap();
//!
//! assert_eq!(output.links(Metamodel::Code).count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod engine;
mod error;

pub use config::{EngineConfig, OVERRIDE_SEPARATOR};
pub use engine::{Engine, EngineInput, EngineOutput};
pub use error::EngineError;
