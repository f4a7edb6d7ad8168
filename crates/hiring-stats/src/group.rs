//! Group-level statistics over a cohort's candidates.
//!
//! Denominators differ on purpose:
//! - `pass_rate` divides by the whole cohort (`n`)
//! - `cutoff_percentile` divides by candidates with a numeric total
//! - field correlations only use candidates with a pass/fail phase role
//!   and a numeric value for that field

use hiring_model::{
    Candidate, FieldStats, FinalComparison, GroupDetailStats, PhaseAverages, ScoreSummary,
};

use crate::cohort::Cohort;
use crate::descriptive::{correlation, max, mean, median, min, std_dev};

/// Lowest numeric total among phase-pass candidates.
pub fn cutoff(candidates: &[Candidate]) -> Option<f64> {
    let pass_totals: Vec<f64> = candidates
        .iter()
        .filter(|candidate| candidate.is_phase_pass())
        .filter_map(|candidate| candidate.total_score)
        .collect();
    min(&pass_totals)
}

/// Percent of scored candidates whose total is at or above `cutoff`.
///
/// This is the share of the scored population at or above the pass line
/// (the report's "합격컷 상위 %"), not a percentile rank.
pub fn cutoff_percentile(candidates: &[Candidate], cutoff: Option<f64>) -> Option<f64> {
    let cutoff = cutoff?;
    let totals: Vec<f64> = candidates.iter().filter_map(|c| c.total_score).collect();
    if totals.is_empty() {
        return None;
    }
    let at_or_above = totals.iter().filter(|total| **total >= cutoff).count();
    Some(100.0 * at_or_above as f64 / totals.len() as f64)
}

/// Percent of the cohort with the pass phase role. `None` for an empty cohort.
pub fn pass_rate(candidates: &[Candidate]) -> Option<f64> {
    if candidates.is_empty() {
        return None;
    }
    let passed = candidates.iter().filter(|c| c.is_phase_pass()).count();
    Some(100.0 * passed as f64 / candidates.len() as f64)
}

/// Field value / pass indicator pairs used for the field correlation.
pub fn pass_fail_pairs(candidates: &[Candidate], field: &str) -> (Vec<f64>, Vec<f64>) {
    let mut values = Vec::new();
    let mut outcomes = Vec::new();
    for candidate in candidates {
        let Some(value) = candidate.score(field) else {
            continue;
        };
        if candidate.is_phase_pass() {
            values.push(value);
            outcomes.push(1.0);
        } else if candidate.is_phase_fail() {
            values.push(value);
            outcomes.push(0.0);
        }
    }
    (values, outcomes)
}

/// Pass/fail averages and pass-fail correlation of one evaluation field.
pub fn field_stats(candidates: &[Candidate], field: &str) -> FieldStats {
    let pass_values: Vec<f64> = candidates
        .iter()
        .filter(|c| c.is_phase_pass())
        .filter_map(|c| c.score(field))
        .collect();
    let fail_values: Vec<f64> = candidates
        .iter()
        .filter(|c| c.is_phase_fail())
        .filter_map(|c| c.score(field))
        .collect();
    let (values, outcomes) = pass_fail_pairs(candidates, field);
    FieldStats {
        field: field.to_string(),
        pass_avg: mean(&pass_values),
        fail_avg: mean(&fail_values),
        correlation: correlation(&values, &outcomes),
        pairs: values.len(),
    }
}

/// Evaluation fields that produced a numeric value for some candidate,
/// in `evaluation_fields` order.
pub fn available_fields(candidates: &[Candidate], evaluation_fields: &[&str]) -> Vec<String> {
    evaluation_fields
        .iter()
        .filter(|field| candidates.iter().any(|c| c.eval_scores.contains_key(**field)))
        .map(|field| (*field).to_string())
        .collect()
}

fn totals_where(candidates: &[Candidate], keep: impl Fn(&Candidate) -> bool) -> Vec<f64> {
    candidates
        .iter()
        .filter(|&c| keep(c))
        .filter_map(|c| c.total_score)
        .collect()
}

/// Descriptive summary of the cohort's numeric totals.
pub fn score_summary(totals: &[f64]) -> ScoreSummary {
    ScoreSummary {
        mean: mean(totals),
        median: median(totals),
        std_dev: std_dev(totals),
        min: min(totals),
        max: max(totals),
    }
}

/// Final outcome comparison: final passes against phase passes that
/// failed the final selection.
pub fn final_comparison(candidates: &[Candidate]) -> FinalComparison {
    let final_pass = totals_where(candidates, Candidate::is_final_pass);
    let final_fail_phase_pass =
        totals_where(candidates, |c| c.is_final_fail() && c.is_phase_pass());
    FinalComparison {
        final_pass_avg: mean(&final_pass),
        final_pass_count: final_pass.len(),
        final_fail_phase_pass_avg: mean(&final_fail_phase_pass),
        final_fail_phase_pass_count: final_fail_phase_pass.len(),
    }
}

/// Full statistics for one cohort.
///
/// `included_fields` selects the field rows; `None` means "every available
/// field".
pub fn group_detail(
    cohort: &Cohort,
    evaluation_fields: &[&str],
    included_fields: Option<&[String]>,
) -> GroupDetailStats {
    let candidates = cohort.candidates.as_slice();
    let totals = cohort.total_scores();
    let pass_totals = totals_where(candidates, Candidate::is_phase_pass);
    let fail_totals = totals_where(candidates, Candidate::is_phase_fail);
    let available = available_fields(candidates, evaluation_fields);
    let included = match included_fields {
        Some(fields) => fields.to_vec(),
        None => available.clone(),
    };
    let fields = included
        .iter()
        .map(|field| field_stats(candidates, field))
        .collect();
    let cutoff = cutoff(candidates);

    GroupDetailStats {
        group_name: cohort.group_name.clone(),
        n: candidates.len(),
        scored: totals.len(),
        pass_count: candidates.iter().filter(|c| c.is_phase_pass()).count(),
        fail_count: candidates.iter().filter(|c| c.is_phase_fail()).count(),
        pass_rate: pass_rate(candidates),
        cutoff,
        cutoff_percentile: cutoff_percentile(candidates, cutoff),
        total: score_summary(&totals),
        fail_max: max(&fail_totals),
        phase_averages: PhaseAverages {
            pass: mean(&pass_totals),
            fail: mean(&fail_totals),
        },
        available_fields: available,
        included_fields: included,
        fields,
        final_comparison: final_comparison(candidates),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use hiring_model::Role;

    use super::*;

    fn candidate(total: Option<f64>, phase: Option<Role>) -> Candidate {
        let mut eval_scores = BTreeMap::new();
        if let Some(total) = total {
            eval_scores.insert("score".to_string(), total);
        }
        Candidate {
            row_index: 0,
            id: None,
            group_name: "G".to_string(),
            phase_role: phase,
            final_role: None,
            eval_scores,
            total_score: total,
        }
    }

    #[test]
    fn cutoff_ignores_unscored_passes() {
        let candidates = vec![
            candidate(None, Some(Role::Pass)),
            candidate(Some(70.0), Some(Role::Pass)),
            candidate(Some(50.0), Some(Role::Fail)),
        ];
        assert_eq!(cutoff(&candidates), Some(70.0));
        assert_eq!(cutoff_percentile(&candidates, Some(70.0)), Some(50.0));
    }

    #[test]
    fn cutoff_none_without_scored_pass() {
        let candidates = vec![
            candidate(None, Some(Role::Pass)),
            candidate(Some(50.0), Some(Role::Fail)),
        ];
        assert_eq!(cutoff(&candidates), None);
        assert_eq!(cutoff_percentile(&candidates, None), None);
    }

    #[test]
    fn pass_rate_counts_unscored_candidates() {
        let candidates = vec![
            candidate(None, Some(Role::Pass)),
            candidate(None, None),
            candidate(Some(1.0), Some(Role::Other)),
            candidate(Some(1.0), Some(Role::Fail)),
        ];
        assert_eq!(pass_rate(&candidates), Some(25.0));
        assert_eq!(pass_rate(&[]), None);
    }

    #[test]
    fn pairs_skip_other_roles_and_missing_values() {
        let candidates = vec![
            candidate(Some(10.0), Some(Role::Pass)),
            candidate(Some(20.0), Some(Role::Other)),
            candidate(None, Some(Role::Fail)),
            candidate(Some(5.0), Some(Role::Fail)),
            candidate(Some(8.0), None),
        ];
        let (values, outcomes) = pass_fail_pairs(&candidates, "score");
        assert_eq!(values, vec![10.0, 5.0]);
        assert_eq!(outcomes, vec![1.0, 0.0]);
        let stats = field_stats(&candidates, "score");
        assert_eq!(stats.pairs, 2);
        assert_eq!(stats.pass_avg, Some(10.0));
        assert_eq!(stats.fail_avg, Some(5.0));
        assert_eq!(stats.correlation, Some(1.0));
    }
}
