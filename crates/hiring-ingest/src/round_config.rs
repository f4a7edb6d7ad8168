//! Round configuration files (TOML or JSON).
//!
//! A round file bundles what the wizard steps collect before statistics:
//! the column mapping, the support groups, the result-role tables and the
//! report options, plus the identifiers of the round and its project.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hiring_model::{
    CalcConfig, DisplayConfig, FieldRoleMapping, GroupDefinition, ResultRoleMapping,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::row_table::RowTable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundConfig {
    #[serde(alias = "round_id")]
    pub round_id: u64,
    #[serde(alias = "project_id")]
    pub project_id: u64,
    pub name: Option<String>,
    pub mapping: FieldRoleMapping,
    #[serde(alias = "support_groups")]
    pub support_groups: GroupDefinition,
    #[serde(alias = "result_mapping")]
    pub result_mapping: ResultRoleMapping,
    #[serde(alias = "included_fields_by_group")]
    pub included_fields_by_group: BTreeMap<String, Vec<String>>,
    pub display: DisplayConfig,
}

impl RoundConfig {
    /// Engine configuration, stamped with the fingerprint of the rows it
    /// will be computed from.
    pub fn to_calc_config(&self, source_fingerprint: Option<String>) -> CalcConfig {
        CalcConfig {
            mapping: self.mapping.clone(),
            support_groups: self.support_groups.clone(),
            result_mapping: self.result_mapping.clone(),
            included_fields_by_group: self.included_fields_by_group.clone(),
            display: self.display.clone(),
            source_fingerprint,
            extra: BTreeMap::new(),
        }
    }

    /// Configuration problems that do not prevent a computation but
    /// usually indicate a mistake.
    pub fn lint(&self, table: &RowTable) -> Vec<String> {
        let headers = &table.headers;
        let mut notes = Vec::new();
        for header in &table.duplicate_headers {
            notes.push(format!(
                "column '{header}' appears more than once; later copies were renamed"
            ));
        }
        let singular = [
            ("candidateIdField", &self.mapping.candidate_id_field),
            ("categoryField", &self.mapping.category_field),
            ("phaseResultField", &self.mapping.phase_result_field),
            ("finalResultField", &self.mapping.final_result_field),
        ];
        for (role, column) in singular {
            if let Some(column) = column
                && !headers.is_empty()
                && !headers.contains(column)
            {
                notes.push(format!("{role} '{column}' is not a column of the data"));
            }
        }
        if self.mapping.category_field.is_none() {
            notes.push("categoryField is not mapped".to_string());
        }
        for field in &self.mapping.evaluation_fields {
            if !headers.is_empty() && !headers.contains(field) {
                notes.push(format!("evaluation field '{field}' is not a column of the data"));
            }
        }
        for value in self.support_groups.overlapping_values() {
            notes.push(format!("category value '{value}' belongs to several groups"));
        }
        notes
    }
}

/// Load a round file, choosing the format by extension.
pub fn load_round_config(path: &Path) -> Result<RoundConfig> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: RoundConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => {
            toml::from_str(&text).map_err(|source| IngestError::Toml {
                path: path.to_path_buf(),
                source,
            })?
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            serde_json::from_str(&text).map_err(|source| IngestError::Json {
                path: path.to_path_buf(),
                source,
            })?
        }
        _ => {
            return Err(IngestError::UnsupportedExtension {
                path: path.to_path_buf(),
                expected: ".toml or .json",
            });
        }
    };
    if config.support_groups.is_empty() {
        warn!(path = %path.display(), "round file defines no support groups");
    }
    info!(
        path = %path.display(),
        round_id = config.round_id,
        groups = config.support_groups.len(),
        "loaded round configuration"
    );
    Ok(config)
}
