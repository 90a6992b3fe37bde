//! Concrete heuristics

mod name_resemblance;
mod names;
mod package_resemblance;

pub use name_resemblance::NameResemblance;
pub use names::{contained_ratio, PreprocessingMethod};
pub use package_resemblance::PackageResemblance;
