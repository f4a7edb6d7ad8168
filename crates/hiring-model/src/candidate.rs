use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// One row's view inside one group's cohort.
///
/// Rebuilt on every computation. A row claimed by two groups yields two
/// candidates sharing the same `row_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Position of the source row in the input row set.
    pub row_index: usize,
    /// Raw candidate identifier, when an id column is mapped and non-empty.
    pub id: Option<String>,
    pub group_name: String,
    pub phase_role: Option<Role>,
    pub final_role: Option<Role>,
    /// Numeric evaluation values; fields that failed coercion are absent.
    pub eval_scores: BTreeMap<String, f64>,
    /// Sum of `eval_scores`, `None` when no field coerced.
    pub total_score: Option<f64>,
}

impl Candidate {
    pub fn is_phase_pass(&self) -> bool {
        self.phase_role.as_ref().is_some_and(Role::is_pass)
    }

    pub fn is_phase_fail(&self) -> bool {
        self.phase_role.as_ref().is_some_and(Role::is_fail)
    }

    pub fn is_final_pass(&self) -> bool {
        self.final_role.as_ref().is_some_and(Role::is_pass)
    }

    pub fn is_final_fail(&self) -> bool {
        self.final_role.as_ref().is_some_and(Role::is_fail)
    }

    pub fn score(&self, field: &str) -> Option<f64> {
        self.eval_scores.get(field).copied()
    }
}
