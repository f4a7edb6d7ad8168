//! Candidate row tables from CSV or JSON exports.

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use hiring_model::{CellValue, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};

/// Headers plus rows, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    /// Header names that occurred more than once. Later copies are kept
    /// under a numbered name (`서류 (2)`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicate_headers: Vec<String>,
}

impl RowTable {
    /// Distinct trimmed values of one column, in first-seen order.
    pub fn distinct_values(&self, header: &str) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for row in &self.rows {
            let value = row.text(header);
            if !value.is_empty() && !values.iter().any(|known| known == &*value) {
                values.push(value.into_owned());
            }
        }
        values
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rename repeated headers so no column overwrites another in a row.
/// Returns the renamed headers and the names that were repeated.
fn dedupe_headers(headers: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut unique: Vec<String> = Vec::with_capacity(headers.len());
    let mut duplicates: Vec<String> = Vec::new();
    for header in headers {
        if header.is_empty() || !unique.contains(&header) {
            unique.push(header);
            continue;
        }
        if !duplicates.contains(&header) {
            duplicates.push(header.clone());
        }
        let mut copy = 2;
        let mut renamed = format!("{header} ({copy})");
        while unique.contains(&renamed) {
            copy += 1;
            renamed = format!("{header} ({copy})");
        }
        unique.push(renamed);
    }
    (unique, duplicates)
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Load rows from a `.csv` or `.json` file.
pub fn read_rows(path: &Path) -> Result<RowTable> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => read_csv_rows(path),
        Some(ext) if ext.eq_ignore_ascii_case("json") => read_json_rows(path),
        _ => Err(IngestError::UnsupportedExtension {
            path: path.to_path_buf(),
            expected: ".csv or .json",
        }),
    }
}

/// Read a CSV export. The first non-blank record is the header row; blank
/// records are skipped and short records are padded with empty cells.
pub fn read_csv_rows(path: &Path) -> Result<RowTable> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut headers: Option<Vec<String>> = None;
    let mut duplicate_headers = Vec::new();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let Some(columns) = headers.as_ref() else {
            let raw: Vec<String> = record.iter().map(normalize_header).collect();
            let (columns, duplicates) = dedupe_headers(raw);
            if !duplicates.is_empty() {
                warn!(
                    path = %path.display(),
                    headers = ?duplicates,
                    "duplicate column headers; later copies renamed"
                );
            }
            headers = Some(columns);
            duplicate_headers = duplicates;
            continue;
        };
        let mut row = Row::new();
        for (idx, header) in columns.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = record.get(idx).unwrap_or("");
            row.insert(header.clone(), CellValue::Text(normalize_cell(value)));
        }
        rows.push(row);
    }

    let table = RowTable {
        headers: headers.unwrap_or_default(),
        rows,
        duplicate_headers,
    };
    info!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "loaded candidate rows"
    );
    Ok(table)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonRows {
    Table {
        #[serde(default)]
        headers: Vec<String>,
        rows: Vec<Row>,
    },
    Rows(Vec<Row>),
}

/// Read a JSON export: either `{ "headers": [...], "rows": [...] }` or a
/// bare array of row objects.
pub fn read_json_rows(path: &Path) -> Result<RowTable> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: JsonRows = serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let table = match parsed {
        JsonRows::Table { headers, rows } => RowTable {
            headers,
            rows,
            duplicate_headers: Vec::new(),
        },
        JsonRows::Rows(rows) => {
            let mut headers: Vec<String> = Vec::new();
            for row in &rows {
                for header in row.headers() {
                    if !headers.iter().any(|known| known == header) {
                        headers.push(header.to_string());
                    }
                }
            }
            RowTable {
                headers,
                rows,
                duplicate_headers: Vec::new(),
            }
        }
    };
    debug!(path = %path.display(), rows = table.rows.len(), "loaded JSON rows");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_header("\u{feff} 지원   분야 "), "지원 분야");
        assert_eq!(normalize_cell("  80 "), "80");
    }

    #[test]
    fn numbers_repeated_headers() {
        let raw = ["서류", "", "서류", "면접", "", "서류", "서류 (3)"]
            .map(String::from)
            .to_vec();
        let (headers, duplicates) = dedupe_headers(raw);
        assert_eq!(
            headers,
            vec!["서류", "", "서류 (2)", "면접", "", "서류 (3)", "서류 (3) (2)"]
        );
        assert_eq!(duplicates, vec!["서류", "서류 (3)"]);
    }
}
