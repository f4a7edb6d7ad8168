pub mod candidate;
pub mod config;
pub mod error;
pub mod groups;
pub mod mapping;
pub mod role;
pub mod row;
pub mod stats;

pub use candidate::Candidate;
pub use config::{CalcConfig, DisplayConfig, MISSING_VALUE};
pub use error::{ModelError, Result};
pub use groups::{GroupDefinition, SupportGroup};
pub use mapping::{FieldRoleMapping, ResultRoleMapping, RoleTable};
pub use role::{EXCLUDED_LABEL, FAIL_LABEL, OTHER_LABEL, PASS_LABEL, Role};
pub use row::{CellValue, Row};
pub use stats::{
    CrossGroupSummaryRow, FieldStats, FinalComparison, GroupDetailStats, PhaseAverages,
    ScoreSummary, StatsSnapshot,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_row_has_no_statistics() {
        let row = CrossGroupSummaryRow::empty("기술");
        assert_eq!(row.n, 0);
        assert!(row.pass_rate.is_none());
        assert!(row.avg_total.is_none());
        assert!(row.cutoff.is_none());
        assert!(row.cutoff_percentile.is_none());
    }

    #[test]
    fn stats_snapshot_serializes() {
        let snapshot = StatsSnapshot {
            cross_group_summary: vec![CrossGroupSummaryRow::empty("A")],
            groups: Default::default(),
            extra: Default::default(),
        };
        let json = serde_json::to_string(&snapshot).expect("serialize stats");
        let round: StatsSnapshot = serde_json::from_str(&json).expect("deserialize stats");
        assert_eq!(round, snapshot);
        assert!(json.contains("\"crossGroupSummary\""));
        assert!(json.contains("\"cutoffPercentile\":null"));
    }
}
