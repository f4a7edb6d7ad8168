//! Computed statistics as they are reported and persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Descriptive statistics over a cohort's numeric total scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Population standard deviation.
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Mean total score of phase-pass and phase-fail candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseAverages {
    pub pass: Option<f64>,
    pub fail: Option<f64>,
}

/// Per evaluation field: pass/fail averages and pass-fail correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStats {
    pub field: String,
    pub pass_avg: Option<f64>,
    pub fail_avg: Option<f64>,
    pub correlation: Option<f64>,
    /// Number of (value, pass/fail) pairs the correlation was computed over.
    pub pairs: usize,
}

/// Final outcome against the phase outcome: final passes versus
/// candidates who passed the phase but failed the final selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalComparison {
    pub final_pass_avg: Option<f64>,
    pub final_pass_count: usize,
    pub final_fail_phase_pass_avg: Option<f64>,
    pub final_fail_phase_pass_count: usize,
}

/// Full statistics for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetailStats {
    pub group_name: String,
    /// Cohort size after exclusion.
    pub n: usize,
    /// Candidates with a numeric total score.
    pub scored: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub pass_rate: Option<f64>,
    pub cutoff: Option<f64>,
    /// Percent of scored candidates at or above the cutoff. This is a
    /// survival share, not a percentile rank.
    pub cutoff_percentile: Option<f64>,
    pub total: ScoreSummary,
    /// Highest total score among phase-fail candidates.
    pub fail_max: Option<f64>,
    pub phase_averages: PhaseAverages,
    pub available_fields: Vec<String>,
    pub included_fields: Vec<String>,
    pub fields: Vec<FieldStats>,
    pub final_comparison: FinalComparison,
}

/// One row of the cross-group comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossGroupSummaryRow {
    pub group_name: String,
    pub n: usize,
    pub pass_rate: Option<f64>,
    pub avg_total: Option<f64>,
    pub cutoff: Option<f64>,
    #[serde(alias = "cutoffPercent")]
    pub cutoff_percentile: Option<f64>,
}

impl CrossGroupSummaryRow {
    /// Row for a group with no candidates.
    pub fn empty(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            n: 0,
            pass_rate: None,
            avg_total: None,
            cutoff: None,
            cutoff_percentile: None,
        }
    }
}

/// Output of one full computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// One row per configured group, in group order.
    pub cross_group_summary: Vec<CrossGroupSummaryRow>,
    pub groups: BTreeMap<String, GroupDetailStats>,
    /// Keys added by the client next to the computed statistics.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StatsSnapshot {
    pub fn summary_for(&self, group_name: &str) -> Option<&CrossGroupSummaryRow> {
        self.cross_group_summary
            .iter()
            .find(|row| row.group_name == group_name)
    }
}
