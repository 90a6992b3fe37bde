//! Counters collected during one consolidation pass

use serde::{Deserialize, Serialize};

/// Outcome counters of a consolidation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidationMetrics {
    /// Phrase mappings still alive when their turn came
    pub phrase_mappings_examined: usize,
    /// Similar (phrase mapping, candidate) pairs considered
    pub candidates_considered: usize,
    /// Phrase mappings merged away
    pub phrase_merges: usize,
    /// Noun mappings merged away
    pub noun_merges: usize,
    /// Candidates skipped because a noun had several similar partners
    pub ambiguous_skips: usize,
    /// Candidates skipped because a noun had no partner or the match was not one-to-one
    pub unmatched_skips: usize,
    /// Candidates skipped because the noun mapping counts differ
    pub size_mismatch_skips: usize,
}

impl ConsolidationMetrics {
    /// Create empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of skipped candidates
    pub fn total_skips(&self) -> usize {
        self.ambiguous_skips + self.unmatched_skips + self.size_mismatch_skips
    }

    /// Add the counters of another pass
    pub fn accumulate(&mut self, other: &ConsolidationMetrics) {
        self.phrase_mappings_examined += other.phrase_mappings_examined;
        self.candidates_considered += other.candidates_considered;
        self.phrase_merges += other.phrase_merges;
        self.noun_merges += other.noun_merges;
        self.ambiguous_skips += other.ambiguous_skips;
        self.unmatched_skips += other.unmatched_skips;
        self.size_mismatch_skips += other.size_mismatch_skips;
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Consolidation Metrics Summary".to_string(),
            "=============================".to_string(),
            format!("Phrase mappings examined: {}", self.phrase_mappings_examined),
            format!("Candidates considered: {}", self.candidates_considered),
            format!("Phrase merges: {}", self.phrase_merges),
            format!("Noun merges: {}", self.noun_merges),
        ];

        if self.total_skips() > 0 {
            lines.push(String::new());
            lines.push("Skipped candidates:".to_string());
            lines.push(format!("  Ambiguous: {}", self.ambiguous_skips));
            lines.push(format!("  Unmatched: {}", self.unmatched_skips));
            lines.push(format!("  Size mismatch: {}", self.size_mismatch_skips));
            lines.push(format!("  Total: {}", self.total_skips()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let metrics = ConsolidationMetrics {
            phrase_mappings_examined: 4,
            candidates_considered: 3,
            phrase_merges: 1,
            noun_merges: 2,
            ambiguous_skips: 1,
            unmatched_skips: 0,
            size_mismatch_skips: 1,
        };

        let summary = metrics.summary();
        assert!(summary.contains("Phrase mappings examined: 4"));
        assert!(summary.contains("Noun merges: 2"));
        assert!(summary.contains("Ambiguous: 1"));
        assert!(summary.contains("Total: 2"));
    }

    #[test]
    fn test_summary_omits_skips_when_none() {
        let summary = ConsolidationMetrics::new().summary();
        assert!(!summary.contains("Skipped candidates"));
    }

    #[test]
    fn test_accumulate() {
        let mut total = ConsolidationMetrics::new();
        let pass = ConsolidationMetrics {
            phrase_merges: 2,
            ambiguous_skips: 1,
            ..Default::default()
        };
        total.accumulate(&pass);
        total.accumulate(&pass);
        assert_eq!(total.phrase_merges, 4);
        assert_eq!(total.total_skips(), 2);
    }
}
