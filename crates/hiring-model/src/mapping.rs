//! Column-role and result-role configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Which raw columns carry which semantic meaning.
///
/// Every singular role is optional so that a partially configured round can
/// still be loaded; a missing column simply resolves to empty values.
/// `evaluation_fields` keeps its configured order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldRoleMapping {
    #[serde(alias = "examNo")]
    pub candidate_id_field: Option<String>,
    #[serde(alias = "supportField")]
    pub category_field: Option<String>,
    #[serde(alias = "evalFields")]
    pub evaluation_fields: Vec<String>,
    #[serde(alias = "phaseResult")]
    pub phase_result_field: Option<String>,
    #[serde(alias = "finalResult")]
    pub final_result_field: Option<String>,
}

impl FieldRoleMapping {
    /// Evaluation fields with duplicates removed, first occurrence wins.
    pub fn distinct_evaluation_fields(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.evaluation_fields.len());
        for field in &self.evaluation_fields {
            if !seen.contains(&field.as_str()) {
                seen.push(field.as_str());
            }
        }
        seen
    }
}

/// Raw value -> role table for one result column.
pub type RoleTable = BTreeMap<String, Role>;

/// Role tables for the phase result and the final result columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRoleMapping {
    pub phase: RoleTable,
    #[serde(rename = "final")]
    pub final_result: RoleTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_field_names() {
        let json = r#"{
            "examNo": "수험번호",
            "supportField": "지원분야",
            "evalFields": ["서류", "면접"],
            "phaseResult": "전형결과",
            "finalResult": "최종결과"
        }"#;
        let mapping: FieldRoleMapping = serde_json::from_str(json).unwrap();
        assert_eq!(mapping.candidate_id_field.as_deref(), Some("수험번호"));
        assert_eq!(mapping.category_field.as_deref(), Some("지원분야"));
        assert_eq!(mapping.evaluation_fields, vec!["서류", "면접"]);
        assert_eq!(mapping.final_result_field.as_deref(), Some("최종결과"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let mapping: FieldRoleMapping = serde_json::from_str("{}").unwrap();
        assert_eq!(mapping, FieldRoleMapping::default());
    }

    #[test]
    fn distinct_fields_keep_first_occurrence() {
        let mapping = FieldRoleMapping {
            evaluation_fields: vec!["b".into(), "a".into(), "b".into()],
            ..FieldRoleMapping::default()
        };
        assert_eq!(mapping.distinct_evaluation_fields(), vec!["b", "a"]);
    }

    #[test]
    fn result_mapping_uses_final_key() {
        let json = r#"{"phase": {"P": "합격"}, "final": {"F": "불합격"}}"#;
        let mapping: ResultRoleMapping = serde_json::from_str(json).unwrap();
        assert_eq!(mapping.phase.get("P"), Some(&Role::Pass));
        assert_eq!(mapping.final_result.get("F"), Some(&Role::Fail));
    }
}
