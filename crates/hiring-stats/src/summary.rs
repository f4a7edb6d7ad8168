//! Cross-group comparison table.

use hiring_model::CrossGroupSummaryRow;

use crate::cohort::Cohort;
use crate::descriptive::mean;
use crate::group::{cutoff, cutoff_percentile, pass_rate};

/// Reduce one cohort to its comparison row.
pub fn summarize_group(cohort: &Cohort) -> CrossGroupSummaryRow {
    if cohort.is_empty() {
        return CrossGroupSummaryRow::empty(&cohort.group_name);
    }
    let candidates = cohort.candidates.as_slice();
    let cutoff = cutoff(candidates);
    CrossGroupSummaryRow {
        group_name: cohort.group_name.clone(),
        n: candidates.len(),
        pass_rate: pass_rate(candidates),
        avg_total: mean(&cohort.total_scores()),
        cutoff,
        cutoff_percentile: cutoff_percentile(candidates, cutoff),
    }
}

/// One row per cohort, in cohort order. Empty cohorts are kept.
pub fn cross_group_summary(cohorts: &[Cohort]) -> Vec<CrossGroupSummaryRow> {
    cohorts.iter().map(summarize_group).collect()
}
