//! Property tests for the descriptive statistics.

use std::collections::BTreeMap;

use hiring_model::{FieldRoleMapping, GroupDefinition, ResultRoleMapping, Role, Row};
use hiring_stats::{compute_stats, correlation, max, mean, min, std_dev};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

fn scores() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, 1..64)
}

proptest! {
    #[test]
    fn mean_lies_within_bounds(xs in scores()) {
        let m = mean(&xs).unwrap();
        let lo = min(&xs).unwrap();
        let hi = max(&xs).unwrap();
        let slack = EPSILON * (lo.abs().max(hi.abs()) + 1.0);
        prop_assert!(m >= lo - slack && m <= hi + slack);
    }

    #[test]
    fn std_dev_is_non_negative(xs in scores()) {
        if let Some(sd) = std_dev(&xs) {
            prop_assert!(sd >= 0.0);
        } else {
            prop_assert_eq!(xs.len(), 1);
        }
    }

    #[test]
    fn correlation_is_bounded(
        pairs in prop::collection::vec((-1.0e3..1.0e3f64, prop::bool::ANY), 2..64)
    ) {
        let xs: Vec<f64> = pairs.iter().map(|(x, _)| *x).collect();
        let ys: Vec<f64> = pairs.iter().map(|(_, y)| if *y { 1.0 } else { 0.0 }).collect();
        if let Some(r) = correlation(&xs, &ys) {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn compute_stats_is_deterministic(
        entries in prop::collection::vec((0u8..3, 0u32..100, 0u8..4), 0..40)
    ) {
        let phases = ["합격", "불합격", "결시", "?"];
        let rows: Vec<Row> = entries
            .iter()
            .map(|(category, score, phase)| {
                Row::from_pairs([
                    ("cat", format!("c{category}")),
                    ("score", score.to_string()),
                    ("phase", phases[*phase as usize].to_string()),
                ])
            })
            .collect();
        let mapping = FieldRoleMapping {
            category_field: Some("cat".into()),
            evaluation_fields: vec!["score".into()],
            phase_result_field: Some("phase".into()),
            ..FieldRoleMapping::default()
        };
        let groups = GroupDefinition::new()
            .with_group("A", ["c0", "c1"]).unwrap()
            .with_group("B", ["c1", "c2"]).unwrap()
            .with_group("C", ["none"]).unwrap();
        let results = ResultRoleMapping {
            phase: [
                ("합격".to_string(), Role::Pass),
                ("불합격".to_string(), Role::Fail),
                ("결시".to_string(), Role::Excluded),
            ]
            .into(),
            final_result: Default::default(),
        };
        let included = BTreeMap::new();
        let first = compute_stats(&rows, &mapping, &groups, &results, &included);
        let second = compute_stats(&rows, &mapping, &groups, &results, &included);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.cross_group_summary.len(), 3);
        let expected_a = entries
            .iter()
            .filter(|(category, _, phase)| *category <= 1 && *phase != 2)
            .count();
        prop_assert_eq!(first.groups["A"].n, expected_a);
        prop_assert_eq!(first.groups["C"].n, 0);
    }
}
