//! Cohort aggregation and statistics engine.
//!
//! The engine turns raw candidate rows plus a round configuration into a
//! [`StatsSnapshot`](hiring_model::StatsSnapshot):
//!
//! 1. [`resolve_role`] maps raw phase/final result values to roles.
//! 2. [`build_cohorts`] partitions rows into groups, dropping rows with the
//!    exclusion role and coercing evaluation cells with [`coerce_score`].
//! 3. [`group_detail`] computes per-group statistics.
//! 4. [`cross_group_summary`] reduces each group to its comparison row.
//!
//! Nothing here performs I/O or fails: undefined statistics are `None`.

pub mod cohort;
pub mod descriptive;
pub mod engine;
pub mod group;
pub mod numeric;
pub mod role;
pub mod summary;

pub use cohort::{Cohort, build_cohort, build_cohorts, score_row, total_of};
pub use descriptive::{correlation, max, mean, median, min, std_dev};
pub use engine::{compute_from_config, compute_stats};
pub use group::{
    available_fields, cutoff, cutoff_percentile, field_stats, final_comparison, group_detail,
    pass_fail_pairs, pass_rate, score_summary,
};
pub use numeric::{coerce_score, parse_score};
pub use role::resolve_role;
pub use summary::{cross_group_summary, summarize_group};
