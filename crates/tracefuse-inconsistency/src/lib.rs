//! Tracefuse Inconsistency Detection
//!
//! Flags model elements that the accepted trace links do not support well
//! enough, typically architecture components never mentioned in the
//! documentation.
//!
//! An entity is reported when its type (or a part of its compound type) is in
//! the allow-list, it occurs fewer than `minimum_links` times among the
//! distinct targets of the accepted links, and no whitelist pattern matches
//! its name or one of its name parts.
//!
//! ```
//! use tracefuse_domain::{EntityId, Metamodel, ModelEntity};
//! use tracefuse_inconsistency::{InconsistencyConfig, InconsistencyFilter};
//!
//! let entities = vec![
//!     ModelEntity::new("a", "Renderer").with_type("BasicComponent"),
//!     ModelEntity::new("b", "Store").with_type("BasicComponent"),
//! ];
//! let linked = EntityId::new("b");
//!
//! let filter = InconsistencyFilter::new(InconsistencyConfig::default()).unwrap();
//! let found = filter.find_undocumented(Metamodel::Architecture, vec![&linked], &entities);
//!
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].name, "Renderer");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod filter;

pub use config::InconsistencyConfig;
pub use error::InconsistencyError;
pub use filter::{Inconsistency, InconsistencyFilter, InconsistencyKind};
