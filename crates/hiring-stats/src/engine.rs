//! Entry point: rows + configuration -> statistics snapshot.

use std::collections::BTreeMap;

use hiring_model::{
    CalcConfig, FieldRoleMapping, GroupDefinition, ResultRoleMapping, Row, StatsSnapshot,
};
use tracing::{debug, info_span, warn};

use crate::cohort::build_cohorts;
use crate::group::group_detail;
use crate::summary::cross_group_summary;

/// Compute cross-group and per-group statistics.
///
/// Pure and deterministic: identical inputs give identical output.
pub fn compute_stats(
    rows: &[Row],
    mapping: &FieldRoleMapping,
    support_groups: &GroupDefinition,
    result_mapping: &ResultRoleMapping,
    included_fields_by_group: &BTreeMap<String, Vec<String>>,
) -> StatsSnapshot {
    let span = info_span!("compute_stats", rows = rows.len(), groups = support_groups.len());
    let _guard = span.enter();

    for name in included_fields_by_group.keys() {
        if support_groups.get(name).is_none() {
            warn!(group = %name, "included fields configured for an unknown group");
        }
    }

    let evaluation_fields = mapping.distinct_evaluation_fields();
    let cohorts = build_cohorts(rows, mapping, support_groups, result_mapping);
    let summary = cross_group_summary(&cohorts);
    let groups = cohorts
        .iter()
        .map(|cohort| {
            let included = included_fields_by_group
                .get(&cohort.group_name)
                .map(Vec::as_slice);
            let detail = group_detail(cohort, &evaluation_fields, included);
            debug!(
                group = %cohort.group_name,
                n = detail.n,
                scored = detail.scored,
                fields = detail.fields.len(),
                "computed group statistics"
            );
            (cohort.group_name.clone(), detail)
        })
        .collect();

    StatsSnapshot {
        cross_group_summary: summary,
        groups,
        extra: BTreeMap::new(),
    }
}

/// [`compute_stats`] driven by a stored configuration.
pub fn compute_from_config(rows: &[Row], config: &CalcConfig) -> StatsSnapshot {
    compute_stats(
        rows,
        &config.mapping,
        &config.support_groups,
        &config.result_mapping,
        &config.included_fields_by_group,
    )
}
