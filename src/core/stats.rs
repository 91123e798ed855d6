//! Summary statistics
//!
//! Derives the headline counts of a run from a [`ReconciliationResult`].

use crate::core::reconcile::{ReconciliationResult, SidePartition};
use serde::Serialize;
use std::fmt;

/// Headline counts for one side of a reconciliation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Distinct canonical keys on this side
    pub unique_count: usize,

    /// Unique keys found on the opposite side
    pub matched_count: usize,

    /// Unique keys in the exclusion set
    pub excluded_count: usize,

    /// Unique keys neither matched nor excluded
    pub unmatched_count: usize,

    /// `matched_count / unique_count * 100`; `None` when there is nothing to divide by
    pub matched_percentage: Option<f64>,

    /// Records on the opposite side, before de-duplication
    pub opposite_side_total_count: usize,
}

impl SummaryStats {
    /// Build stats from raw counts
    ///
    /// `matched_count` is derived as `total_unique - unmatched - excluded`,
    /// so the three partitions always add up to the unique total.
    pub fn from_counts(
        unmatched_count: usize,
        excluded_count: usize,
        total_unique: usize,
        opposite_side_total_count: usize,
    ) -> Self {
        let matched_count = total_unique
            .saturating_sub(unmatched_count)
            .saturating_sub(excluded_count);

        let matched_percentage = if total_unique == 0 {
            None
        } else {
            Some(matched_count as f64 / total_unique as f64 * 100.0)
        };

        Self {
            unique_count: total_unique,
            matched_count,
            excluded_count,
            unmatched_count,
            matched_percentage,
            opposite_side_total_count,
        }
    }

    /// Stats for side A of a result
    pub fn for_side_a<A, B>(result: &ReconciliationResult<A, B>) -> Self {
        Self::from_partition(&result.side_a, &result.side_b)
    }

    /// Stats for side B of a result
    pub fn for_side_b<A, B>(result: &ReconciliationResult<A, B>) -> Self {
        Self::from_partition(&result.side_b, &result.side_a)
    }

    fn from_partition(own: &SidePartition, opposite: &SidePartition) -> Self {
        Self::from_counts(
            own.unmatched,
            own.excluded,
            own.unique,
            opposite.total_records,
        )
    }

    /// Matched percentage with two decimals, or "N/A"
    pub fn matched_percentage_display(&self) -> String {
        match self.matched_percentage {
            Some(pct) => format!("{pct:.2}%"),
            None => "N/A".to_string(),
        }
    }

    /// Log the stats under a side label
    pub fn log_summary(&self, side: &str) {
        tracing::info!(
            side = side,
            unique = self.unique_count,
            matched = self.matched_count,
            excluded = self.excluded_count,
            unmatched = self.unmatched_count,
            matched_percentage = %self.matched_percentage_display(),
            opposite_side_total = self.opposite_side_total_count,
            "Reconciliation summary"
        );
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Unique: {}", self.unique_count)?;
        writeln!(f, "  Matched: {}", self.matched_count)?;
        writeln!(f, "  Excluded: {}", self.excluded_count)?;
        writeln!(f, "  Not matched or excluded: {}", self.unmatched_count)?;
        writeln!(f, "  Matched rate: {}", self.matched_percentage_display())?;
        write!(f, "  Opposite side records: {}", self.opposite_side_total_count)
    }
}

/// Summarize side A of a result against its unique total
pub fn summarize<A, B>(
    result: &ReconciliationResult<A, B>,
    total_side_a_unique: usize,
) -> SummaryStats {
    SummaryStats::from_counts(
        result.side_a.unmatched,
        result.excluded_a_count,
        total_side_a_unique,
        result.side_b.total_records,
    )
}
