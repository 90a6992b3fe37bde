//! Aggregation functions over probability multisets
//!
//! Every function here is insensitive to the order of its inputs, so a
//! [`Confidence`](crate::Confidence) or an aggregation node yields the same
//! value no matter in which order observations or child results arrive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Strategy used to fuse several probabilities into one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationFunction {
    /// Arithmetic mean
    #[default]
    Average,
    /// Largest value
    Max,
    /// Smallest value
    Min,
    /// Middle value (mean of the two middle values for even counts)
    Median,
}

impl AggregationFunction {
    /// All supported functions
    pub const ALL: [AggregationFunction; 4] = [
        AggregationFunction::Average,
        AggregationFunction::Max,
        AggregationFunction::Min,
        AggregationFunction::Median,
    ];

    /// Apply the function. An empty input yields 0.
    pub fn apply(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }

        match self {
            AggregationFunction::Average => values.iter().sum::<f64>() / values.len() as f64,
            AggregationFunction::Max => values.iter().copied().fold(f64::MIN, f64::max),
            AggregationFunction::Min => values.iter().copied().fold(f64::MAX, f64::min),
            AggregationFunction::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                }
            }
        }
    }

    /// Lowercase name, as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationFunction::Average => "average",
            AggregationFunction::Max => "max",
            AggregationFunction::Min => "min",
            AggregationFunction::Median => "median",
        }
    }
}

impl fmt::Display for AggregationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "average" | "avg" | "mean" => Ok(AggregationFunction::Average),
            "max" | "maximum" => Ok(AggregationFunction::Max),
            "min" | "minimum" => Ok(AggregationFunction::Min),
            "median" => Ok(AggregationFunction::Median),
            _ => Err(format!("Invalid aggregation function: {}", s)),
        }
    }
}
