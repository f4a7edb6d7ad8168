//! Engine configuration as persisted with a calculation snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::groups::GroupDefinition;
use crate::mapping::{FieldRoleMapping, ResultRoleMapping};

/// Everything needed to reproduce a statistics computation from raw rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalcConfig {
    pub mapping: FieldRoleMapping,
    pub support_groups: GroupDefinition,
    pub result_mapping: ResultRoleMapping,
    /// Evaluation fields shown per group. Groups without an entry fall back
    /// to the fields that produced a numeric value in that group.
    pub included_fields_by_group: BTreeMap<String, Vec<String>>,
    pub display: DisplayConfig,
    /// SHA-256 of the row set the stats were computed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_fingerprint: Option<String>,
    /// Client keys this crate does not interpret (`styleConfig`,
    /// `groupOrder`, ...), stored and returned verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Report formatting options.
///
/// Unknown keys (UI style settings) are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayConfig {
    pub score_precision: usize,
    pub rate_precision: usize,
    pub correlation_precision: usize,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            score_precision: 2,
            rate_precision: 1,
            correlation_precision: 3,
            extra: BTreeMap::new(),
        }
    }
}

/// Placeholder rendered for an undefined statistic.
pub const MISSING_VALUE: &str = "-";

impl DisplayConfig {
    pub fn format_score(&self, value: Option<f64>) -> String {
        format_fixed(value, self.score_precision)
    }

    pub fn format_rate(&self, value: Option<f64>) -> String {
        format_fixed(value, self.rate_precision)
    }

    pub fn format_correlation(&self, value: Option<f64>) -> String {
        format_fixed(value, self.correlation_precision)
    }
}

fn format_fixed(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(value) => format!("{value:.precision$}"),
        None => MISSING_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_defaults_and_extras() {
        let json = r##"{"ratePrecision": 2, "chartColor": "#336699"}"##;
        let display: DisplayConfig = serde_json::from_str(json).unwrap();
        assert_eq!(display.rate_precision, 2);
        assert_eq!(display.score_precision, 2);
        assert_eq!(display.correlation_precision, 3);
        assert_eq!(
            display.extra.get("chartColor"),
            Some(&serde_json::Value::String("#336699".to_string()))
        );
    }

    #[test]
    fn calc_config_keeps_unknown_keys() {
        let json = r#"{"groupOrder":["기술","행정"],"mapping":{"categoryField":"지원분야"}}"#;
        let config: CalcConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.mapping.category_field.as_deref(), Some("지원분야"));
        assert_eq!(config.extra.len(), 1);
        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back["groupOrder"], serde_json::json!(["기술", "행정"]));
        assert!(back.get("sourceFingerprint").is_none());
    }

    #[test]
    fn formats_missing_as_dash() {
        let display = DisplayConfig::default();
        assert_eq!(display.format_rate(Some(200.0 / 3.0)), "66.7");
        assert_eq!(display.format_score(Some(80.0)), "80.00");
        assert_eq!(display.format_correlation(None), "-");
    }
}
