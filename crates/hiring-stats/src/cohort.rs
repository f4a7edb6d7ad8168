//! Cohort construction: rows -> candidates per group.

use std::collections::BTreeMap;

use hiring_model::{
    Candidate, FieldRoleMapping, GroupDefinition, ResultRoleMapping, Row, SupportGroup,
};
use tracing::{debug, trace, warn};

use crate::numeric::coerce_score;
use crate::role::resolve_role;

/// Candidates of one group, in source row order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    pub group_name: String,
    pub candidates: Vec<Candidate>,
    /// Rows of this group dropped because of the exclusion role.
    pub excluded: usize,
}

impl Cohort {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Numeric total scores in candidate order.
    pub fn total_scores(&self) -> Vec<f64> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.total_score)
            .collect()
    }
}

/// Build one cohort per configured group, in group order.
///
/// Groups with no matching rows produce an empty cohort rather than being
/// skipped. A row whose category value is claimed by several groups is
/// included in each of them.
pub fn build_cohorts(
    rows: &[Row],
    mapping: &FieldRoleMapping,
    groups: &GroupDefinition,
    result_mapping: &ResultRoleMapping,
) -> Vec<Cohort> {
    if mapping.category_field.is_none() && !groups.is_empty() {
        warn!("no category field mapped; every group will be empty");
    }
    let overlapping = groups.overlapping_values();
    if !overlapping.is_empty() {
        warn!(
            values = ?overlapping,
            "raw category values claimed by more than one group"
        );
    }
    groups
        .iter()
        .map(|group| build_cohort(rows, mapping, group, result_mapping))
        .collect()
}

/// Build the cohort of a single group.
pub fn build_cohort(
    rows: &[Row],
    mapping: &FieldRoleMapping,
    group: &SupportGroup,
    result_mapping: &ResultRoleMapping,
) -> Cohort {
    let evaluation_fields = mapping.distinct_evaluation_fields();
    let mut candidates = Vec::new();
    let mut excluded = 0usize;

    let Some(category_field) = mapping.category_field.as_deref() else {
        return Cohort {
            group_name: group.name.clone(),
            candidates,
            excluded,
        };
    };

    for (row_index, row) in rows.iter().enumerate() {
        if !group.contains(&row.text(category_field)) {
            continue;
        }
        let phase_role = mapping
            .phase_result_field
            .as_deref()
            .and_then(|field| resolve_role(&row.text(field), &result_mapping.phase));
        if phase_role.as_ref().is_some_and(|role| role.is_excluded()) {
            trace!(row_index, group = %group.name, "row excluded from cohort");
            excluded += 1;
            continue;
        }
        let final_role = mapping
            .final_result_field
            .as_deref()
            .and_then(|field| resolve_role(&row.text(field), &result_mapping.final_result));
        let id = mapping
            .candidate_id_field
            .as_deref()
            .map(|field| row.text(field).into_owned())
            .filter(|id| !id.is_empty());
        let eval_scores = score_row(row, &evaluation_fields);
        let total_score = total_of(&eval_scores);

        candidates.push(Candidate {
            row_index,
            id,
            group_name: group.name.clone(),
            phase_role,
            final_role,
            eval_scores,
            total_score,
        });
    }

    debug!(
        group = %group.name,
        candidates = candidates.len(),
        excluded,
        "built cohort"
    );
    Cohort {
        group_name: group.name.clone(),
        candidates,
        excluded,
    }
}

/// Coerce every evaluation field of a row; non-numeric fields are omitted.
pub fn score_row(row: &Row, evaluation_fields: &[&str]) -> BTreeMap<String, f64> {
    evaluation_fields
        .iter()
        .filter_map(|field| {
            coerce_score(row.get(field)).map(|value| ((*field).to_string(), value))
        })
        .collect()
}

/// Sum of the coerced values, `None` when nothing coerced.
pub fn total_of(eval_scores: &BTreeMap<String, f64>) -> Option<f64> {
    if eval_scores.is_empty() {
        None
    } else {
        Some(eval_scores.values().sum())
    }
}
